use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::str::FromStr;
use std::time::Duration;

use crate::data::models::UserProfile;

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: IpAddr,
    pub port: u16,
    pub log_level: String,
    pub busy_timeout: Duration,
    pub pool_max_size: u32,
    pub session_secure: bool,
    pub static_dir: String,
    /// Scheduling parameters given to newly registered users
    pub default_profile: UserProfile,
}

impl Config {
    pub fn from_env() -> Self {
        let database_url =
            std::env::var("DATABASE_URL").unwrap_or_else(|_| "flips.db".to_string());

        let host = env_parse("HOST", IpAddr::V4(Ipv4Addr::new(127, 0, 0, 1)));
        let port = env_parse("PORT", 8080u16);

        let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string());

        let session_secure = std::env::var("SESSION_SECURE")
            .map(|v| v == "true" || v == "1")
            .unwrap_or(false);

        Self {
            database_url,
            host,
            port,
            log_level,
            busy_timeout: Duration::from_millis(env_parse("SQLITE_BUSY_TIMEOUT_MS", 5000u64)),
            pool_max_size: env_parse("POOL_MAX_SIZE", 8u32).max(1),
            session_secure,
            static_dir: std::env::var("STATIC_DIR").unwrap_or_else(|_| "static".to_string()),
            default_profile: UserProfile {
                username: String::new(),
                bonus: env_parse("DEFAULT_BONUS", 1.05),
                punishment: env_parse("DEFAULT_PUNISHMENT", 0.8),
                new_limit: env_parse("DEFAULT_NEW_LIMIT", 20),
                due_limit: env_parse("DEFAULT_DUE_LIMIT", 200),
            },
        }
    }

    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    std::env::var(key)
        .ok()
        .and_then(|value| value.parse::<T>().ok())
        .unwrap_or(default)
}
