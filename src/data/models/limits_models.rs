use chrono::NaiveDate;
use diesel::{Insertable, Queryable, Selectable};
use serde::Serialize;

use crate::schema::limits;

/// Remaining daily quota for one user on one calendar day
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Queryable, Selectable)]
#[diesel(table_name = limits)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct Limits {
    pub id: i32,
    pub username: String,
    pub new_limit: i64, // May go negative after answers beyond the quota
    pub due_limit: i64,
    pub day: NaiveDate,
}

#[derive(Insertable)]
#[diesel(table_name = limits)]
pub struct NewLimits<'a> {
    pub username: &'a str,
    pub new_limit: i64,
    pub due_limit: i64,
    pub day: NaiveDate,
}
