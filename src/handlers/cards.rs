use axum::{Json, Router, extract::State, http::StatusCode, routing::post};
use tower_sessions::Session;

use super::{blocking, current_profile, now};
use crate::AppState;
use crate::data::models::{BulkCreateRequest, BulkCreateResponse, Card, CreateCardRequest};
use crate::features::ApiError;

pub fn cards_router() -> Router<AppState> {
    Router::new()
        .route("/cards", post(create_card))
        .route("/cards/bulk", post(bulk_create))
}

async fn create_card(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<CreateCardRequest>,
) -> Result<(StatusCode, Json<Card>), ApiError> {
    let profile = current_profile(&state, &session).await?;
    let service = state.service.clone();
    let card = blocking(move || service.add_card(&profile.username, request, now())).await?;
    Ok((StatusCode::CREATED, Json(card)))
}

async fn bulk_create(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<BulkCreateRequest>,
) -> Result<Json<BulkCreateResponse>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let service = state.service.clone();
    let owner = username.clone();
    let response = blocking(move || service.bulk_add(&owner, request, now())).await?;
    log::info!(
        "{} bulk-added {} cards, {} failed",
        username,
        response.added.len(),
        response.failed.len()
    );
    Ok(Json(response))
}
