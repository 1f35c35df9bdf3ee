use axum::{Json, Router, extract::State, routing::get};
use tower_sessions::Session;
use validator::Validate;

use super::{blocking, current_profile};
use crate::AppState;
use crate::data::models::{UpdateSettingsRequest, UserProfile};
use crate::features::ApiError;
use crate::srs::SrsError;

pub fn settings_router() -> Router<AppState> {
    Router::new().route("/settings", get(get_settings).put(update_settings))
}

async fn get_settings(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<UserProfile>, ApiError> {
    Ok(Json(current_profile(&state, &session).await?))
}

async fn update_settings(
    State(state): State<AppState>,
    session: Session,
    Json(settings): Json<UpdateSettingsRequest>,
) -> Result<Json<UserProfile>, ApiError> {
    let profile = current_profile(&state, &session).await?;
    settings
        .validate()
        .map_err(|e| SrsError::InvalidInput(e.to_string()))?;

    let service = state.service.clone();
    let updated = blocking(move || service.update_settings(&profile.username, &settings)).await?;
    Ok(Json(updated))
}
