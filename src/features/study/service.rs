use chrono::{Duration, NaiveDateTime};
use diesel::SqliteConnection;
use diesel::r2d2::{ConnectionManager, PooledConnection};

use crate::data::models::{
    BulkCreateRequest, BulkCreateResponse, Card, CreateCardRequest, DayCount, HardestCard,
    NewHistory, Schedule, ScheduleAmount, StatsOverview, TodayStats, UpdateSettingsRequest,
    UserProfile,
};
use crate::data::repositories::{CardRepository, HistoryRepository, SqliteStore, UserRepository};
use crate::db::DbPool;
use crate::features::stats::{count_by_day, start_of_day, time_spent};
use crate::features::study::retry_on_conflict;
use crate::srs::{self, LimitKind, LimitsStore, ScheduleStore, SrsError, quota, selector};

type PooledConn = PooledConnection<ConnectionManager<SqliteConnection>>;

/// Entry point of the scheduling core for the service layer.
///
/// Every method is blocking; async callers should run them on the blocking pool.
#[derive(Clone)]
pub struct StudyService {
    pool: DbPool,
}

impl StudyService {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    fn conn(&self) -> Result<PooledConn, SrsError> {
        self.pool.get().map_err(|e| {
            log::error!("Failed to get DB connection: {}", e);
            SrsError::from(e)
        })
    }

    /// Runs `op` on a pooled connection, retrying on lock contention.
    fn with_retry<T, F>(&self, mut op: F) -> Result<T, SrsError>
    where
        F: FnMut(&mut SqliteConnection) -> Result<T, SrsError>,
    {
        let mut conn = self.conn()?;
        retry_on_conflict(|| op(&mut *conn))
    }

    pub fn profile(&self, username: &str) -> Result<Option<UserProfile>, SrsError> {
        let mut conn = self.conn()?;
        let user = UserRepository::find_by_username(&mut conn, username)?;
        Ok(user.map(|user| user.profile()))
    }

    /// Stores new scheduling parameters and returns the resulting profile.
    pub fn update_settings(
        &self,
        username: &str,
        settings: &UpdateSettingsRequest,
    ) -> Result<UserProfile, SrsError> {
        self.with_retry(|conn| {
            if UserRepository::update_settings(conn, username, settings)? == 0 {
                return Err(SrsError::NotFound(format!("User {username} not found")));
            }
            log::info!("{} updated settings", username);
            Ok(UserProfile {
                username: username.to_string(),
                bonus: settings.bonus,
                punishment: settings.punishment,
                new_limit: settings.new_limit,
                due_limit: settings.due_limit,
            })
        })
    }

    /// Card the user should study next, or `None` when nothing is pending.
    pub fn next_card(
        &self,
        profile: &UserProfile,
        now: NaiveDateTime,
    ) -> Result<Option<Card>, SrsError> {
        let mut conn = self.conn()?;
        let picked = {
            let mut store = SqliteStore::new(&mut conn);
            selector::select_next(&mut store, profile, now, &mut rand::rng())?
        };

        let Some(schedule) = picked else {
            return Ok(None);
        };

        match CardRepository::find(&mut conn, &schedule.card_id)? {
            Some(card) => Ok(Some(card)),
            None => {
                log::error!(
                    "Schedule {} of {} points at missing card {}",
                    schedule.id,
                    schedule.username,
                    schedule.card_id
                );
                Err(SrsError::InconsistentState(format!(
                    "card {} referenced by a schedule does not exist",
                    schedule.card_id
                )))
            }
        }
    }

    /// Applies an answer: state transition, quota charge, persistence and
    /// history, all inside one write transaction.
    pub fn record_answer(
        &self,
        profile: &UserProfile,
        card_id: &str,
        correct: bool,
        now: NaiveDateTime,
    ) -> Result<Schedule, SrsError> {
        self.with_retry(|conn| {
            conn.immediate_transaction(|conn| {
                let mut store = SqliteStore::new(conn);
                let current = store.find(&profile.username, card_id)?.ok_or_else(|| {
                    SrsError::NotFound(format!("Schedule not found for card {card_id}"))
                })?;

                let updated = srs::record_answer(&current, correct, profile, now);
                quota::consume(&mut store, profile, now.date(), current.status)?;
                store.save(&updated)?;

                HistoryRepository::add(
                    conn,
                    &NewHistory {
                        username: &profile.username,
                        card_id,
                        answer: correct,
                        created_at: now,
                    },
                )?;

                log::debug!(
                    "{} answered {} {}: {:?} -> {:?}, interval {:?}",
                    profile.username,
                    card_id,
                    if correct { "correctly" } else { "incorrectly" },
                    current.status,
                    updated.status,
                    updated.interval_min
                );
                Ok(updated)
            })
        })
    }

    /// Manually raises today's NEW or DUE quota by `amount`.
    pub fn increase_limit(
        &self,
        profile: &UserProfile,
        limit_type: &str,
        amount: i32,
        now: NaiveDateTime,
    ) -> Result<LimitKind, SrsError> {
        let kind: LimitKind = limit_type.parse()?;
        self.with_retry(|conn| {
            let mut store = SqliteStore::new(conn);
            quota::grant(&mut store, profile, now.date(), kind, amount)
        })?;
        Ok(kind)
    }

    pub fn schedule_snapshot(&self, username: &str) -> Result<Vec<Schedule>, SrsError> {
        let mut conn = self.conn()?;
        SqliteStore::new(&mut conn).all_for_user(username)
    }

    /// Pool sizes with NEW and DUE capped by today's quota.
    pub fn study_amount(
        &self,
        profile: &UserProfile,
        now: NaiveDateTime,
    ) -> Result<ScheduleAmount, SrsError> {
        self.with_retry(|conn| {
            let mut store = SqliteStore::new(conn);
            let username = profile.username.as_str();
            let new = store.count_new(username)?;
            let cram = store.count_cram(username)?;
            let due = store.count_due(username, now)?;
            let limits = store.get_or_create_limits(profile, now.date())?;
            Ok(ScheduleAmount {
                new: new.min(limits.new_limit).max(0),
                cram,
                due: due.min(limits.due_limit).max(0),
            })
        })
    }

    pub fn overview(&self, username: &str, now: NaiveDateTime) -> Result<StatsOverview, SrsError> {
        let mut conn = self.conn()?;
        let mut store = SqliteStore::new(&mut conn);
        let new = store.count_new(username)?;
        let cram = store.count_cram(username)?;
        let due = store.count_due(username, now)?;
        Ok(StatsOverview {
            total: new + cram + due,
            new,
            cram,
            due,
        })
    }

    pub fn hardest(&self, username: &str, limit: i64) -> Result<Vec<HardestCard>, SrsError> {
        if !(1..=20).contains(&limit) {
            return Err(SrsError::InvalidInput("limit must be between 1 and 20".to_string()));
        }
        let mut conn = self.conn()?;
        let rows = SqliteStore::new(&mut conn).hardest(username, limit)?;
        Ok(rows
            .into_iter()
            .map(|(card, ease)| HardestCard { card, ease })
            .collect())
    }

    /// DUE cards per day from today through `days` days ahead.
    pub fn due_chart(
        &self,
        username: &str,
        days: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<DayCount>, SrsError> {
        check_days(days)?;
        let from = start_of_day(now.date());
        let to = from + Duration::days(days + 1);
        let mut conn = self.conn()?;
        let dues = SqliteStore::new(&mut conn).due_between(username, from, to)?;
        Ok(count_by_day(dues))
    }

    /// Answers per day over the last `days` days, today included.
    pub fn activity(
        &self,
        username: &str,
        days: i64,
        now: NaiveDateTime,
    ) -> Result<Vec<DayCount>, SrsError> {
        check_days(days)?;
        let since = start_of_day(now.date()) - Duration::days(days - 1);
        let mut conn = self.conn()?;
        let answered = HistoryRepository::answered_since(&mut conn, username, since)?;
        Ok(count_by_day(answered))
    }

    pub fn today(&self, username: &str, now: NaiveDateTime) -> Result<TodayStats, SrsError> {
        let mut conn = self.conn()?;
        let answered =
            HistoryRepository::answered_since(&mut conn, username, start_of_day(now.date()))?;
        Ok(TodayStats {
            count: answered.len() as i64,
            time_spent: time_spent(&answered),
        })
    }

    /// Stores the card if it is new and adds it to the user's NEW pool.
    pub fn add_card(
        &self,
        username: &str,
        request: CreateCardRequest,
        now: NaiveDateTime,
    ) -> Result<Card, SrsError> {
        if request.word.trim().is_empty() || request.translation.trim().is_empty() {
            return Err(SrsError::InvalidInput(
                "word and translation must not be empty".to_string(),
            ));
        }
        let card = request.into_card(now);

        self.with_retry(|conn| {
            conn.immediate_transaction(|conn| {
                CardRepository::create_if_absent(conn, &card)?;
                SqliteStore::new(conn).add_card(username, &card.id, now)?;
                let stored = CardRepository::find(conn, &card.id)?;
                stored.ok_or_else(|| {
                    SrsError::InconsistentState(format!("card {} vanished after insert", card.id))
                })
            })
        })
    }

    pub fn bulk_add(
        &self,
        username: &str,
        request: BulkCreateRequest,
        now: NaiveDateTime,
    ) -> Result<BulkCreateResponse, SrsError> {
        let mut response = BulkCreateResponse::default();
        for card in request.cards {
            let word = card.word.trim().to_string();
            if word.is_empty() {
                continue;
            }
            match self.add_card(username, card, now) {
                Ok(_) => response.added.push(word),
                Err(SrsError::InvalidInput(reason)) => {
                    log::warn!("Failed to add word {}: {}", word, reason);
                    response.failed.push(word);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(response)
    }

    /// Removes the card from the user's collection, and the card itself once
    /// nobody else studies it.
    pub fn delete_card(&self, username: &str, card_id: &str) -> Result<(), SrsError> {
        self.with_retry(|conn| {
            conn.immediate_transaction(|conn| {
                let mut store = SqliteStore::new(conn);
                if !store.delete(username, card_id)? {
                    return Err(SrsError::NotFound(format!("Schedule not found for card {card_id}")));
                }
                if !store.has_other_users(card_id, username)? {
                    CardRepository::delete(conn, card_id)?;
                }
                Ok(())
            })
        })
    }

    /// The user's schedules with the card each one refers to.
    pub fn backup_rows(&self, username: &str) -> Result<Vec<(Schedule, Card)>, SrsError> {
        let mut conn = self.conn()?;
        let schedules = SqliteStore::new(&mut conn).all_for_user(username)?;
        schedules
            .into_iter()
            .map(|schedule| match CardRepository::find(&mut conn, &schedule.card_id)? {
                Some(card) => Ok((schedule, card)),
                None => Err(SrsError::InconsistentState(format!(
                    "card {} referenced by a schedule does not exist",
                    schedule.card_id
                ))),
            })
            .collect()
    }
}

fn check_days(days: i64) -> Result<(), SrsError> {
    if (1..=365).contains(&days) {
        Ok(())
    } else {
        Err(SrsError::InvalidInput("days must be between 1 and 365".to_string()))
    }
}
