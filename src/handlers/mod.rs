pub mod auth;
pub mod backup;
pub mod cards;
pub mod settings;
pub mod stats;
pub mod study;

use chrono::NaiveDateTime;
use tower_sessions::Session;

use crate::AppState;
use crate::data::models::UserProfile;
use crate::features::ApiError;
use crate::srs::SrsError;
use crate::utils::current_username;

/// Server-local wall clock; the study day rolls over at local midnight.
pub fn now() -> NaiveDateTime {
    chrono::Local::now().naive_local()
}

/// Runs blocking database work off the async executor.
pub async fn blocking<T, F>(work: F) -> Result<T, ApiError>
where
    F: FnOnce() -> Result<T, SrsError> + Send + 'static,
    T: Send + 'static,
{
    Ok(tokio::task::spawn_blocking(work).await??)
}

/// Profile of the logged-in user, or 401.
pub async fn current_profile(state: &AppState, session: &Session) -> Result<UserProfile, ApiError> {
    let username = current_username(session).await?.ok_or(ApiError::Unauthorized)?;
    let service = state.service.clone();
    let profile = blocking(move || service.profile(&username)).await?;
    profile.ok_or_else(|| {
        log::warn!("Session refers to a user that no longer exists");
        ApiError::Unauthorized
    })
}
