use serde::{Deserialize, Serialize};

/// Request payload for `POST /api/study/answer`
#[derive(Debug, Deserialize)]
pub struct Answer {
    pub card_id: String,
    pub answer: bool, // true when the user recalled the card
}

/// Request payload for `POST /api/study/limits/increase`
#[derive(Debug, Deserialize)]
pub struct IncreaseLimitsRequest {
    pub limit_type: String, // "NEW" or "DUE"
    pub amount: i32,
}

/// Pool sizes, optionally capped by today's quota
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScheduleAmount {
    pub new: i64,
    pub cram: i64,
    pub due: i64,
}

/// Standard API response format
#[derive(Serialize)]
pub struct ApiResponse {
    pub success: bool,
    pub message: String,
}
