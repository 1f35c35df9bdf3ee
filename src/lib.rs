//! Flips: a spaced-repetition vocabulary trainer served over a JSON API.

pub mod config;
pub mod data;
pub mod db;
pub mod features;
pub mod handlers;
pub mod logging;
pub mod schema;
pub mod srs;
pub mod utils;

use std::sync::Arc;

use axum::Router;
use time::Duration;
use tower_http::services::ServeDir;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::Config;
use crate::db::DbPool;
use crate::features::study::StudyService;
use crate::handlers::{auth, backup, cards, settings, stats, study};

/// Shared state handed to every handler.
#[derive(Clone)]
pub struct AppState {
    pub service: StudyService,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(pool: DbPool, config: Config) -> Self {
        Self {
            service: StudyService::new(pool),
            config: Arc::new(config),
        }
    }
}

pub fn build_router(state: AppState) -> Router {
    // Sessions configuration
    let session_store = MemoryStore::default();
    let session_layer = SessionManagerLayer::new(session_store)
        .with_expiry(Expiry::OnInactivity(Duration::days(1)))
        .with_secure(state.config.session_secure);

    let api_router = Router::new()
        .nest("/auth", auth::auth_router())
        .nest("/study", study::study_router())
        .nest("/stats", stats::stats_router())
        .nest("/backup", backup::backup_router())
        .merge(cards::cards_router())
        .merge(settings::settings_router());

    let static_files = ServeDir::new(&state.config.static_dir);

    Router::new()
        .nest("/api", api_router)
        .fallback_service(static_files)
        .with_state(state)
        .layer(session_layer)
}
