//! Picks the next schedule to present.
//!
//! An overdue CRAM card always wins. Otherwise the NEW and due-DUE pools are
//! capped by today's quota and one of them is chosen with probability
//! proportional to its cap; a card is then drawn uniformly from that pool.
//! When both caps are exhausted a pending CRAM card is still offered even if
//! it is not yet due.

use chrono::NaiveDateTime;
use rand::Rng;

use super::error::SrsError;
use super::store::{LimitsStore, ScheduleStore};
use crate::data::models::{Limits, Schedule, UserProfile};

/// Pool a card is drawn from once the CRAM shortcut does not apply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Pool {
    New,
    Due,
}

/// Pool sizes clamped to today's remaining quota.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caps {
    pub new: i64,
    pub due: i64,
}

impl Caps {
    pub fn compute(available_new: i64, available_due: i64, limits: &Limits) -> Self {
        Caps {
            new: available_new.min(limits.new_limit).max(0),
            due: available_due.min(limits.due_limit).max(0),
        }
    }

    pub fn is_exhausted(&self) -> bool {
        self.new == 0 && self.due == 0
    }
}

/// Weighted coin flip between the two pools. A pool with cap 0 is never chosen.
pub fn choose_pool<R: Rng + ?Sized>(caps: Caps, rng: &mut R) -> Option<Pool> {
    if caps.is_exhausted() {
        return None;
    }
    if rng.random_range(0..caps.new + caps.due) < caps.new {
        Some(Pool::New)
    } else {
        Some(Pool::Due)
    }
}

pub fn select_next<S, R>(
    store: &mut S,
    profile: &UserProfile,
    now: NaiveDateTime,
    rng: &mut R,
) -> Result<Option<Schedule>, SrsError>
where
    S: ScheduleStore + LimitsStore + ?Sized,
    R: Rng + ?Sized,
{
    let username = profile.username.as_str();

    let cram = store.earliest_cram(username)?;
    if let Some(cram) = &cram {
        if cram.due.is_some_and(|due| due <= now) {
            return Ok(Some(cram.clone()));
        }
    }

    let available_new = store.count_new(username)?;
    let available_due = store.count_due(username, now)?;
    let limits = store.get_or_create_limits(profile, now.date())?;
    let caps = Caps::compute(available_new, available_due, &limits);

    let Some(pool) = choose_pool(caps, rng) else {
        return Ok(cram);
    };

    // Draw among every eligible row, not just the capped count
    let picked = match pool {
        Pool::New => {
            let offset = rng.random_range(0..available_new);
            store.nth_new(username, offset)?
        }
        Pool::Due => {
            let offset = rng.random_range(0..available_due);
            store.nth_due(username, now, offset)?
        }
    };

    // The pool may have shrunk between count and fetch under a concurrent writer
    Ok(picked.or(cram))
}
