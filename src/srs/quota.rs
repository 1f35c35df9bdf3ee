use std::fmt;
use std::str::FromStr;

use chrono::NaiveDate;
use serde::Serialize;

use super::error::SrsError;
use super::store::LimitsStore;
use crate::data::models::{CardStatus, Limits, UserProfile};

/// Which daily quota an adjustment applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum LimitKind {
    New,
    Due,
}

impl LimitKind {
    /// Quota consumed by answering a card in `status`; CRAM is always free.
    pub fn consumed_by(status: CardStatus) -> Option<LimitKind> {
        match status {
            CardStatus::New => Some(LimitKind::New),
            CardStatus::Due => Some(LimitKind::Due),
            CardStatus::Cram => None,
        }
    }
}

impl FromStr for LimitKind {
    type Err = SrsError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "NEW" => Ok(LimitKind::New),
            "DUE" => Ok(LimitKind::Due),
            other => Err(SrsError::InvalidInput(format!(
                "limit_type must be \"NEW\" or \"DUE\", got {other:?}"
            ))),
        }
    }
}

impl fmt::Display for LimitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LimitKind::New => f.write_str("NEW"),
            LimitKind::Due => f.write_str("DUE"),
        }
    }
}

/// Charges one unit of quota for answering a card that was in `status`.
/// Returns the updated row, or `None` when the status is quota-free.
pub fn consume<S: LimitsStore + ?Sized>(
    store: &mut S,
    profile: &UserProfile,
    day: NaiveDate,
    status: CardStatus,
) -> Result<Option<Limits>, SrsError> {
    match LimitKind::consumed_by(status) {
        Some(kind) => store.adjust_limit(profile, day, kind, -1).map(Some),
        None => Ok(None),
    }
}

/// Manually raises one of today's quotas.
pub fn grant<S: LimitsStore + ?Sized>(
    store: &mut S,
    profile: &UserProfile,
    day: NaiveDate,
    kind: LimitKind,
    amount: i32,
) -> Result<Limits, SrsError> {
    if amount <= 0 {
        return Err(SrsError::InvalidInput(
            "Amount must be greater than 0".to_string(),
        ));
    }
    let limits = store.adjust_limit(profile, day, kind, amount)?;
    log::info!(
        "Granted {} extra {} cards to {} for {}",
        amount,
        kind,
        profile.username,
        day
    );
    Ok(limits)
}
