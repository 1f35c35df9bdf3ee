use serde::{Deserialize, Serialize};

use super::Card;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatsOverview {
    pub total: i64,
    pub new: i64,
    pub cram: i64,
    pub due: i64,
}

#[derive(Debug, Clone, Serialize)]
pub struct HardestCard {
    pub card: Card,
    pub ease: f64,
}

/// Count of answers or due cards on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DayCount {
    pub date: String, // YYYY-MM-DD
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TodayStats {
    pub count: i64,
    pub time_spent: Option<String>, // H:MM between first and last answer
}

#[derive(Debug, Deserialize)]
pub struct LimitParams {
    pub limit: Option<i64>,
}

#[derive(Debug, Deserialize)]
pub struct DaysParams {
    pub days: Option<i64>,
}
