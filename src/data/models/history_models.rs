use chrono::NaiveDateTime;
use diesel::Insertable;

use crate::schema::history;

/// Audit row written for every recorded answer
#[derive(Insertable)]
#[diesel(table_name = history)]
pub struct NewHistory<'a> {
    pub username: &'a str,
    pub card_id: &'a str,
    pub answer: bool,
    pub created_at: NaiveDateTime,
}
