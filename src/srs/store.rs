//! Storage seams used by the scheduling core.
//!
//! The core never talks to a connection directly; it calls these traits so
//! that selection and quota logic can run against SQLite in production and
//! against an in-memory fake in tests.

use chrono::{NaiveDate, NaiveDateTime};

use super::error::SrsError;
use super::quota::LimitKind;
use crate::data::models::{Limits, Schedule, UserProfile};

pub trait ScheduleStore {
    /// CRAM schedule with the smallest `due`, due or not.
    fn earliest_cram(&mut self, username: &str) -> Result<Option<Schedule>, SrsError>;

    fn count_new(&mut self, username: &str) -> Result<i64, SrsError>;

    fn count_cram(&mut self, username: &str) -> Result<i64, SrsError>;

    /// DUE schedules whose `due <= now`.
    fn count_due(&mut self, username: &str, now: NaiveDateTime) -> Result<i64, SrsError>;

    /// The `offset`-th NEW schedule in id order.
    fn nth_new(&mut self, username: &str, offset: i64) -> Result<Option<Schedule>, SrsError>;

    /// The `offset`-th due DUE schedule in id order.
    fn nth_due(
        &mut self,
        username: &str,
        now: NaiveDateTime,
        offset: i64,
    ) -> Result<Option<Schedule>, SrsError>;

    fn find(&mut self, username: &str, card_id: &str) -> Result<Option<Schedule>, SrsError>;

    /// Persists the scheduling fields of an existing schedule.
    fn save(&mut self, schedule: &Schedule) -> Result<(), SrsError>;

    fn all_for_user(&mut self, username: &str) -> Result<Vec<Schedule>, SrsError>;
}

pub trait LimitsStore {
    /// Returns the limits row for `day`, creating it from the profile defaults
    /// if this is the first access of the day.
    fn get_or_create_limits(
        &mut self,
        profile: &UserProfile,
        day: NaiveDate,
    ) -> Result<Limits, SrsError>;

    /// Adds `delta` to one quota of the `day` row in a single atomic update.
    fn adjust_limit(
        &mut self,
        profile: &UserProfile,
        day: NaiveDate,
        kind: LimitKind,
        delta: i32,
    ) -> Result<Limits, SrsError>;
}
