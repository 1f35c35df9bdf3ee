use axum::{
    Json, Router,
    extract::{Path, State},
    routing::{delete, get, post},
};
use tower_sessions::Session;

use super::{blocking, current_profile, now};
use crate::AppState;
use crate::data::models::{
    Answer, ApiResponse, Card, IncreaseLimitsRequest, Schedule, ScheduleAmount,
};
use crate::features::ApiError;

pub fn study_router() -> Router<AppState> {
    Router::new()
        .route("/next", get(next_card))
        .route("/answer", post(answer))
        .route("/stats", get(study_stats))
        .route("/limits/increase", post(increase_limits))
        .route("/schedules", get(schedules))
        .route("/cards/{card_id}", delete(delete_card))
}

async fn next_card(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Option<Card>>, ApiError> {
    let profile = current_profile(&state, &session).await?;
    let service = state.service.clone();
    let card = blocking(move || service.next_card(&profile, now())).await?;
    Ok(Json(card))
}

async fn answer(
    State(state): State<AppState>,
    session: Session,
    Json(answer): Json<Answer>,
) -> Result<Json<Schedule>, ApiError> {
    let profile = current_profile(&state, &session).await?;
    let service = state.service.clone();
    let schedule = blocking(move || {
        service.record_answer(&profile, &answer.card_id, answer.answer, now())
    })
    .await?;
    Ok(Json(schedule))
}

async fn study_stats(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ScheduleAmount>, ApiError> {
    let profile = current_profile(&state, &session).await?;
    let service = state.service.clone();
    Ok(Json(blocking(move || service.study_amount(&profile, now())).await?))
}

async fn increase_limits(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<IncreaseLimitsRequest>,
) -> Result<Json<ApiResponse>, ApiError> {
    let profile = current_profile(&state, &session).await?;
    let service = state.service.clone();
    let amount = request.amount;
    let kind = blocking(move || {
        service.increase_limit(&profile, &request.limit_type, request.amount, now())
    })
    .await?;
    Ok(Json(ApiResponse {
        success: true,
        message: format!("Increased today's {kind} limit by {amount}"),
    }))
}

async fn schedules(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<Vec<Schedule>>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let service = state.service.clone();
    Ok(Json(blocking(move || service.schedule_snapshot(&username)).await?))
}

async fn delete_card(
    State(state): State<AppState>,
    session: Session,
    Path(card_id): Path<String>,
) -> Result<Json<ApiResponse>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let service = state.service.clone();
    let removed = card_id.clone();
    blocking(move || service.delete_card(&username, &removed)).await?;
    Ok(Json(ApiResponse {
        success: true,
        message: format!("Card {card_id} removed"),
    }))
}
