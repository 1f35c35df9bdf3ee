use chrono::NaiveDateTime;
use diesel::{Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};

use crate::schema::schedules;

/// Review status of a (user, card) pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CardStatus {
    /// Never answered correctly
    #[serde(rename = "N")]
    New,
    /// Short-term relearning, freshly added or recently lapsed
    #[serde(rename = "C")]
    Cram,
    /// Graduated to multi-day review
    #[serde(rename = "D")]
    Due,
}

impl CardStatus {
    /// Single-letter code stored in `schedules.status`.
    pub const fn code(self) -> &'static str {
        match self {
            CardStatus::New => "N",
            CardStatus::Cram => "C",
            CardStatus::Due => "D",
        }
    }
}

impl TryFrom<String> for CardStatus {
    type Error = String;

    fn try_from(code: String) -> Result<Self, Self::Error> {
        match code.as_str() {
            "N" => Ok(CardStatus::New),
            "C" => Ok(CardStatus::Cram),
            "D" => Ok(CardStatus::Due),
            other => Err(format!("unknown schedule status code {other:?}")),
        }
    }
}

impl From<CardStatus> for String {
    fn from(status: CardStatus) -> Self {
        status.code().to_string()
    }
}

/// Scheduling state of one card for one user
#[derive(Debug, Clone, PartialEq, Serialize, Queryable, Selectable)]
#[diesel(table_name = schedules)]
pub struct Schedule {
    pub id: i32,
    pub username: String,
    pub card_id: String,
    pub ease: f64,                      // Multiplicative growth factor, always > 0
    pub due: Option<NaiveDateTime>,     // Unset until the first answer
    pub interval_min: Option<i32>,      // Minutes between `due` and the last answer
    #[diesel(deserialize_as = String)]
    pub status: CardStatus,
    pub created_at: NaiveDateTime,
}

/// Default ease assigned to every fresh schedule.
pub const DEFAULT_EASE: f64 = 2.5;

#[derive(Insertable)]
#[diesel(table_name = schedules)]
pub struct NewSchedule<'a> {
    pub username: &'a str,
    pub card_id: &'a str,
    pub ease: f64,
    pub status: &'a str,
    pub created_at: NaiveDateTime,
}

impl<'a> NewSchedule<'a> {
    pub fn fresh(username: &'a str, card_id: &'a str, created_at: NaiveDateTime) -> Self {
        Self {
            username,
            card_id,
            ease: DEFAULT_EASE,
            status: CardStatus::New.code(),
            created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_codes_round_trip_through_storage_form() {
        for status in [CardStatus::New, CardStatus::Cram, CardStatus::Due] {
            let stored: String = status.into();
            assert_eq!(CardStatus::try_from(stored).unwrap(), status);
        }
    }

    #[test]
    fn unknown_status_code_is_rejected() {
        assert!(CardStatus::try_from("X".to_string()).is_err());
    }

    #[test]
    fn status_serializes_as_code() {
        assert_eq!(serde_json::to_string(&CardStatus::Cram).unwrap(), "\"C\"");
    }
}
