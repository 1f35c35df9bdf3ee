#![allow(dead_code)]

use std::net::{IpAddr, Ipv4Addr};
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use diesel::connection::SimpleConnection;
use diesel::{Connection, SqliteConnection};
use tempfile::TempDir;

use flips::config::Config;
use flips::data::models::UserProfile;
use flips::data::repositories::UserRepository;
use flips::db::{self, DbPool};

pub fn config_for(dir: &TempDir) -> Config {
    Config {
        database_url: dir.path().join("flips.db").to_string_lossy().into_owned(),
        host: IpAddr::V4(Ipv4Addr::LOCALHOST),
        port: 0,
        log_level: "warn".to_string(),
        busy_timeout: Duration::from_secs(5),
        pool_max_size: 4,
        session_secure: false,
        static_dir: dir.path().to_string_lossy().into_owned(),
        default_profile: profile(""),
    }
}

/// Pool over a fresh on-disk database. Keep the `TempDir` alive for the test.
pub fn setup() -> (TempDir, Config, DbPool) {
    setup_with(|_| {})
}

pub fn setup_with(configure: impl FnOnce(&mut Config)) -> (TempDir, Config, DbPool) {
    let dir = tempfile::tempdir().expect("temp dir");
    let mut config = config_for(&dir);
    configure(&mut config);
    let pool = db::build_pool(&config).expect("pool");
    db::init_schema(&mut pool.get().expect("connection")).expect("schema");
    (dir, config, pool)
}

/// Single-connection pool that fails fast on a held write lock.
pub fn setup_without_busy_wait() -> (TempDir, Config, DbPool) {
    setup_with(|config| {
        config.busy_timeout = Duration::ZERO;
        config.pool_max_size = 1;
    })
}

/// Separate connection holding the database write lock until `COMMIT`.
pub fn hold_write_lock(config: &Config) -> SqliteConnection {
    let mut conn = SqliteConnection::establish(&config.database_url).expect("blocker connection");
    conn.batch_execute("BEGIN IMMEDIATE").expect("write lock");
    conn
}

pub fn profile(username: &str) -> UserProfile {
    UserProfile {
        username: username.to_string(),
        bonus: 1.05,
        punishment: 0.8,
        new_limit: 20,
        due_limit: 200,
    }
}

pub fn create_user(pool: &DbPool, username: &str) -> UserProfile {
    let mut conn = pool.get().expect("connection");
    UserRepository::create_user(&mut conn, username, "not-a-real-hash", &profile(""))
        .expect("user")
        .profile()
}

pub fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2024, 6, 1)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}
