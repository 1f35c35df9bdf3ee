use chrono::{NaiveDate, NaiveDateTime};
use diesel::prelude::*;

use crate::data::models::{
    Card, CardStatus, Limits, NewLimits, NewSchedule, Schedule, UserProfile,
};
use crate::schema::{cards, limits, schedules};
use crate::srs::{LimitKind, LimitsStore, ScheduleStore, SrsError};

/// SQLite-backed schedule and limits store bound to one connection.
///
/// Callers that need a read-modify-write to be atomic open the transaction
/// on the connection first and build the store inside it.
pub struct SqliteStore<'a> {
    conn: &'a mut SqliteConnection,
}

impl<'a> SqliteStore<'a> {
    pub fn new(conn: &'a mut SqliteConnection) -> Self {
        SqliteStore { conn }
    }

    /// Adds a NEW schedule for the pair unless one exists. Returns whether a row was inserted.
    pub fn add_card(
        &mut self,
        username: &str,
        card_id: &str,
        now: NaiveDateTime,
    ) -> Result<bool, SrsError> {
        let inserted = diesel::insert_into(schedules::table)
            .values(&NewSchedule::fresh(username, card_id, now))
            .on_conflict((schedules::username, schedules::card_id))
            .do_nothing()
            .execute(self.conn)?;
        Ok(inserted > 0)
    }

    pub fn delete(&mut self, username: &str, card_id: &str) -> Result<bool, SrsError> {
        let deleted = diesel::delete(
            schedules::table
                .filter(schedules::username.eq(username))
                .filter(schedules::card_id.eq(card_id)),
        )
        .execute(self.conn)?;
        Ok(deleted > 0)
    }

    pub fn has_other_users(&mut self, card_id: &str, exclude_username: &str) -> Result<bool, SrsError> {
        use diesel::dsl::exists;

        let found = diesel::select(exists(
            schedules::table
                .filter(schedules::card_id.eq(card_id))
                .filter(schedules::username.ne(exclude_username)),
        ))
        .get_result::<bool>(self.conn)?;
        Ok(found)
    }

    /// Lowest-ease schedules of the user together with their cards.
    pub fn hardest(&mut self, username: &str, limit: i64) -> Result<Vec<(Card, f64)>, SrsError> {
        let rows = schedules::table
            .inner_join(cards::table)
            .filter(schedules::username.eq(username))
            .order((schedules::ease.asc(), schedules::id.asc()))
            .limit(limit)
            .select((Card::as_select(), schedules::ease))
            .load::<(Card, f64)>(self.conn)?;
        Ok(rows)
    }

    /// Due timestamps of DUE schedules in `[from, to)`, earliest first.
    pub fn due_between(
        &mut self,
        username: &str,
        from: NaiveDateTime,
        to: NaiveDateTime,
    ) -> Result<Vec<NaiveDateTime>, SrsError> {
        let dues = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::status.eq(CardStatus::Due.code()))
            .filter(schedules::due.ge(from))
            .filter(schedules::due.lt(to))
            .order(schedules::due.asc())
            .select(schedules::due)
            .load::<Option<NaiveDateTime>>(self.conn)?;
        Ok(dues.into_iter().flatten().collect())
    }

    fn count_status(&mut self, username: &str, status: CardStatus) -> Result<i64, SrsError> {
        let count = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::status.eq(status.code()))
            .count()
            .get_result::<i64>(self.conn)?;
        Ok(count)
    }

    fn find_limits(&mut self, username: &str, day: NaiveDate) -> Result<Option<Limits>, SrsError> {
        let row = limits::table
            .filter(limits::username.eq(username))
            .filter(limits::day.eq(day))
            .select(Limits::as_select())
            .first(self.conn)
            .optional()?;
        Ok(row)
    }
}

impl ScheduleStore for SqliteStore<'_> {
    fn earliest_cram(&mut self, username: &str) -> Result<Option<Schedule>, SrsError> {
        let cram = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::status.eq(CardStatus::Cram.code()))
            .order((schedules::due.asc(), schedules::id.asc()))
            .select(Schedule::as_select())
            .first(self.conn)
            .optional()?;
        Ok(cram)
    }

    fn count_new(&mut self, username: &str) -> Result<i64, SrsError> {
        self.count_status(username, CardStatus::New)
    }

    fn count_cram(&mut self, username: &str) -> Result<i64, SrsError> {
        self.count_status(username, CardStatus::Cram)
    }

    fn count_due(&mut self, username: &str, now: NaiveDateTime) -> Result<i64, SrsError> {
        let count = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::status.eq(CardStatus::Due.code()))
            .filter(schedules::due.le(now))
            .count()
            .get_result::<i64>(self.conn)?;
        Ok(count)
    }

    fn nth_new(&mut self, username: &str, offset: i64) -> Result<Option<Schedule>, SrsError> {
        let picked = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::status.eq(CardStatus::New.code()))
            .order(schedules::id.asc())
            .offset(offset)
            .select(Schedule::as_select())
            .first(self.conn)
            .optional()?;
        Ok(picked)
    }

    fn nth_due(
        &mut self,
        username: &str,
        now: NaiveDateTime,
        offset: i64,
    ) -> Result<Option<Schedule>, SrsError> {
        let picked = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::status.eq(CardStatus::Due.code()))
            .filter(schedules::due.le(now))
            .order(schedules::id.asc())
            .offset(offset)
            .select(Schedule::as_select())
            .first(self.conn)
            .optional()?;
        Ok(picked)
    }

    fn find(&mut self, username: &str, card_id: &str) -> Result<Option<Schedule>, SrsError> {
        let schedule = schedules::table
            .filter(schedules::username.eq(username))
            .filter(schedules::card_id.eq(card_id))
            .select(Schedule::as_select())
            .first(self.conn)
            .optional()?;
        Ok(schedule)
    }

    fn save(&mut self, schedule: &Schedule) -> Result<(), SrsError> {
        let updated = diesel::update(schedules::table.find(schedule.id))
            .set((
                schedules::ease.eq(schedule.ease),
                schedules::due.eq(schedule.due),
                schedules::interval_min.eq(schedule.interval_min),
                schedules::status.eq(schedule.status.code()),
            ))
            .execute(self.conn)?;

        if updated == 0 {
            return Err(SrsError::NotFound(format!(
                "schedule {} for card {}",
                schedule.id, schedule.card_id
            )));
        }
        Ok(())
    }

    fn all_for_user(&mut self, username: &str) -> Result<Vec<Schedule>, SrsError> {
        let all = schedules::table
            .filter(schedules::username.eq(username))
            .order(schedules::id.asc())
            .select(Schedule::as_select())
            .load(self.conn)?;
        Ok(all)
    }
}

impl LimitsStore for SqliteStore<'_> {
    fn get_or_create_limits(
        &mut self,
        profile: &UserProfile,
        day: NaiveDate,
    ) -> Result<Limits, SrsError> {
        if let Some(existing) = self.find_limits(&profile.username, day)? {
            return Ok(existing);
        }

        // A concurrent first access may win the insert; either way one row survives
        diesel::insert_into(limits::table)
            .values(&NewLimits {
                username: &profile.username,
                new_limit: i64::from(profile.new_limit),
                due_limit: i64::from(profile.due_limit),
                day,
            })
            .on_conflict((limits::username, limits::day))
            .do_nothing()
            .execute(self.conn)?;

        self.find_limits(&profile.username, day)?.ok_or_else(|| {
            SrsError::InconsistentState(format!(
                "limits row for {} on {} vanished after insert",
                profile.username, day
            ))
        })
    }

    fn adjust_limit(
        &mut self,
        profile: &UserProfile,
        day: NaiveDate,
        kind: LimitKind,
        delta: i32,
    ) -> Result<Limits, SrsError> {
        self.get_or_create_limits(profile, day)?;

        let row = limits::table
            .filter(limits::username.eq(&profile.username))
            .filter(limits::day.eq(day));

        // In-place arithmetic so concurrent adjustments never drop a delta
        match kind {
            LimitKind::New => diesel::update(row)
                .set(limits::new_limit.eq(limits::new_limit + i64::from(delta)))
                .execute(self.conn)?,
            LimitKind::Due => diesel::update(row)
                .set(limits::due_limit.eq(limits::due_limit + i64::from(delta)))
                .execute(self.conn)?,
        };

        self.find_limits(&profile.username, day)?.ok_or_else(|| {
            SrsError::InconsistentState(format!(
                "limits row for {} on {} vanished during update",
                profile.username, day
            ))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::test_connection;
    use chrono::Duration;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 10)
            .unwrap()
            .and_hms_opt(12, 0, 0)
            .unwrap()
    }

    fn profile() -> UserProfile {
        UserProfile {
            username: "alice".to_string(),
            bonus: 1.05,
            punishment: 0.8,
            new_limit: 20,
            due_limit: 200,
        }
    }

    fn card(id: &str) -> Card {
        Card {
            id: id.to_string(),
            word: format!("word {id}"),
            translation: format!("translation {id}"),
            definition: None,
            meta: None,
            pronunciation: None,
            example: None,
            example_translation: None,
            created_at: now(),
        }
    }

    #[test]
    fn add_card_is_idempotent_per_pair() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);

        assert!(store.add_card("alice", "c1", now()).unwrap());
        assert!(!store.add_card("alice", "c1", now()).unwrap());
        assert!(store.add_card("bob", "c1", now()).unwrap());

        assert_eq!(store.count_new("alice").unwrap(), 1);
        let fresh = store.find("alice", "c1").unwrap().unwrap();
        assert_eq!(fresh.status, CardStatus::New);
        assert_eq!(fresh.ease, 2.5);
        assert_eq!(fresh.interval_min, None);
        assert_eq!(fresh.due, None);
    }

    #[test]
    fn limits_are_created_once_per_day() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);

        let first = store.get_or_create_limits(&profile(), now().date()).unwrap();
        let second = store.get_or_create_limits(&profile(), now().date()).unwrap();
        assert_eq!(first, second);
        assert_eq!((first.new_limit, first.due_limit), (20, 200));

        let tomorrow = now().date() + Duration::days(1);
        let next_day = store.get_or_create_limits(&profile(), tomorrow).unwrap();
        assert_ne!(next_day.id, first.id);
    }

    #[test]
    fn limits_rows_keep_their_creation_values() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        store.get_or_create_limits(&profile(), now().date()).unwrap();

        let changed = UserProfile { new_limit: 3, ..profile() };
        let limits = store.get_or_create_limits(&changed, now().date()).unwrap();
        assert_eq!(limits.new_limit, 20);
    }

    #[test]
    fn adjustments_are_unclamped() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        let day = now().date();

        let limits = store.adjust_limit(&profile(), day, LimitKind::New, -25).unwrap();
        assert_eq!(limits.new_limit, -5);
        let limits = store.adjust_limit(&profile(), day, LimitKind::Due, 1000).unwrap();
        assert_eq!(limits.due_limit, 1200);
        assert_eq!(limits.new_limit, -5);
    }

    #[test]
    fn large_grants_are_not_truncated() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        let day = now().date();

        store.adjust_limit(&profile(), day, LimitKind::New, i32::MAX).unwrap();
        let limits = store.adjust_limit(&profile(), day, LimitKind::New, i32::MAX).unwrap();
        assert_eq!(limits.new_limit, 20 + 2 * i64::from(i32::MAX));
        assert_eq!(store.get_or_create_limits(&profile(), day).unwrap(), limits);
    }

    #[test]
    fn due_pool_only_counts_elapsed_due_rows() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        for id in ["a", "b", "c"] {
            store.add_card("alice", id, now()).unwrap();
        }

        let mut past = store.find("alice", "a").unwrap().unwrap();
        past.status = CardStatus::Due;
        past.due = Some(now() - Duration::hours(1));
        store.save(&past).unwrap();

        let mut future = store.find("alice", "b").unwrap().unwrap();
        future.status = CardStatus::Due;
        future.due = Some(now() + Duration::hours(1));
        store.save(&future).unwrap();

        assert_eq!(store.count_due("alice", now()).unwrap(), 1);
        assert_eq!(store.count_new("alice").unwrap(), 1);
        assert_eq!(
            store.nth_due("alice", now(), 0).unwrap().unwrap().card_id,
            "a"
        );
        assert!(store.nth_due("alice", now(), 1).unwrap().is_none());
        assert_eq!(store.nth_new("alice", 0).unwrap().unwrap().card_id, "c");
    }

    #[test]
    fn earliest_cram_orders_by_due() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        for (id, minutes) in [("late", 30), ("soon", 2)] {
            store.add_card("alice", id, now()).unwrap();
            let mut schedule = store.find("alice", id).unwrap().unwrap();
            schedule.status = CardStatus::Cram;
            schedule.interval_min = Some(1);
            schedule.due = Some(now() + Duration::minutes(minutes));
            store.save(&schedule).unwrap();
        }

        let cram = store.earliest_cram("alice").unwrap().unwrap();
        assert_eq!(cram.card_id, "soon");
        assert_eq!(store.count_cram("alice").unwrap(), 2);
    }

    #[test]
    fn saving_missing_schedule_is_not_found() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        store.add_card("alice", "c1", now()).unwrap();
        let mut ghost = store.find("alice", "c1").unwrap().unwrap();
        ghost.id += 100;

        assert!(matches!(store.save(&ghost), Err(SrsError::NotFound(_))));
    }

    #[test]
    fn hardest_joins_cards_by_ascending_ease() {
        let mut conn = test_connection();
        for id in ["x", "y"] {
            crate::data::repositories::CardRepository::create_if_absent(&mut conn, &card(id)).unwrap();
        }
        let mut store = SqliteStore::new(&mut conn);
        store.add_card("alice", "x", now()).unwrap();
        store.add_card("alice", "y", now()).unwrap();
        let mut y = store.find("alice", "y").unwrap().unwrap();
        y.ease = 1.1;
        store.save(&y).unwrap();

        let hardest = store.hardest("alice", 10).unwrap();
        assert_eq!(hardest.len(), 2);
        assert_eq!(hardest[0].0.id, "y");
        assert_eq!(hardest[0].1, 1.1);
    }

    #[test]
    fn shared_cards_report_other_users() {
        let mut conn = test_connection();
        let mut store = SqliteStore::new(&mut conn);
        store.add_card("alice", "c1", now()).unwrap();
        store.add_card("bob", "c1", now()).unwrap();

        assert!(store.has_other_users("c1", "alice").unwrap());
        assert!(store.delete("bob", "c1").unwrap());
        assert!(!store.has_other_users("c1", "alice").unwrap());
        assert!(!store.delete("bob", "c1").unwrap());
    }
}
