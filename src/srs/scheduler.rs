//! Status/interval/ease transitions for a single schedule.
//!
//! Intervals ramp through fixed relearning steps of 1 and 10 minutes, then one
//! day, and grow multiplicatively by ease after that:
//!
//! - lapse: `ease *= punishment` (floored at [`MIN_EASE`]), status CRAM, interval 1
//! - correct: interval 10 -> 1440, none/1 -> 10, otherwise `floor(interval * ease)` but at least 1,
//!   then `ease *= bonus`; NEW -> CRAM, CRAM -> DUE once the interval exceeds 10
//!
//! Every answer sets `due = now + interval` minutes.

use chrono::{Duration, NaiveDateTime};

use crate::data::models::{CardStatus, Schedule, UserProfile};

/// First relearning step after a lapse or for a fresh card.
pub const LAPSE_INTERVAL_MIN: i32 = 1;
/// Second relearning step.
pub const RELEARN_INTERVAL_MIN: i32 = 10;
/// Graduation interval, one day.
pub const GRADUATE_INTERVAL_MIN: i32 = 60 * 24;
/// Lower bound for ease so repeated lapses never reach zero.
pub const MIN_EASE: f64 = f64::MIN_POSITIVE;

/// Computes the schedule that results from answering `schedule` at `now`.
pub fn record_answer(
    schedule: &Schedule,
    correct: bool,
    profile: &UserProfile,
    now: NaiveDateTime,
) -> Schedule {
    let mut next = schedule.clone();

    if correct {
        let interval = next_interval(schedule.interval_min, schedule.ease);
        next.interval_min = Some(interval);
        next.ease = schedule.ease * profile.bonus;
        next.status = match schedule.status {
            CardStatus::New => CardStatus::Cram,
            CardStatus::Cram if interval > RELEARN_INTERVAL_MIN => CardStatus::Due,
            CardStatus::Cram => CardStatus::Cram,
            CardStatus::Due => CardStatus::Due,
        };
    } else {
        next.ease = (schedule.ease * profile.punishment).max(MIN_EASE);
        next.status = CardStatus::Cram;
        next.interval_min = Some(LAPSE_INTERVAL_MIN);
    }

    let minutes = next.interval_min.unwrap_or(LAPSE_INTERVAL_MIN);
    next.due = Some(now + Duration::minutes(i64::from(minutes)));
    next
}

fn next_interval(current: Option<i32>, ease: f64) -> i32 {
    match current {
        Some(RELEARN_INTERVAL_MIN) => GRADUATE_INTERVAL_MIN,
        None | Some(LAPSE_INTERVAL_MIN) => RELEARN_INTERVAL_MIN,
        Some(minutes) => {
            let grown = (f64::from(minutes) * ease).floor();
            // Saturate rather than wrap for absurdly mature cards
            if grown >= f64::from(i32::MAX) {
                i32::MAX
            } else {
                // A worn-down ease must not leave the card due forever
                (grown as i32).max(LAPSE_INTERVAL_MIN)
            }
        }
    }
}
