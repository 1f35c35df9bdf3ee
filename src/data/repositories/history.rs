use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::data::models::NewHistory;
use crate::schema::history;

pub struct HistoryRepository;

impl HistoryRepository {
    pub fn add(
        conn: &mut SqliteConnection,
        entry: &NewHistory<'_>,
    ) -> Result<(), diesel::result::Error> {
        diesel::insert_into(history::table)
            .values(entry)
            .execute(conn)?;
        Ok(())
    }

    /// Answer timestamps at or after `since`, oldest first.
    pub fn answered_since(
        conn: &mut SqliteConnection,
        username: &str,
        since: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, diesel::result::Error> {
        history::table
            .filter(history::username.eq(username))
            .filter(history::created_at.ge(since))
            .order(history::created_at.asc())
            .select(history::created_at)
            .load(conn)
    }
}
