use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};
use tower_sessions::Session;

use super::{blocking, current_profile, now};
use crate::AppState;
use crate::data::models::{DayCount, DaysParams, HardestCard, LimitParams, StatsOverview, TodayStats};
use crate::features::ApiError;

const DEFAULT_HARDEST: i64 = 10;
const DEFAULT_CHART_DAYS: i64 = 30;
const DEFAULT_ACTIVITY_DAYS: i64 = 365;

pub fn stats_router() -> Router<AppState> {
    Router::new()
        .route("/overview", get(overview))
        .route("/hardest", get(hardest))
        .route("/due-chart", get(due_chart))
        .route("/activity", get(activity))
        .route("/today", get(today))
}

async fn overview(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<StatsOverview>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let service = state.service.clone();
    Ok(Json(blocking(move || service.overview(&username, now())).await?))
}

async fn hardest(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<LimitParams>,
) -> Result<Json<Vec<HardestCard>>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let limit = params.limit.unwrap_or(DEFAULT_HARDEST);
    let service = state.service.clone();
    Ok(Json(blocking(move || service.hardest(&username, limit)).await?))
}

async fn due_chart(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DaysParams>,
) -> Result<Json<Vec<DayCount>>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let days = params.days.unwrap_or(DEFAULT_CHART_DAYS);
    let service = state.service.clone();
    Ok(Json(blocking(move || service.due_chart(&username, days, now())).await?))
}

async fn activity(
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<DaysParams>,
) -> Result<Json<Vec<DayCount>>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let days = params.days.unwrap_or(DEFAULT_ACTIVITY_DAYS);
    let service = state.service.clone();
    Ok(Json(blocking(move || service.activity(&username, days, now())).await?))
}

async fn today(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<TodayStats>, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let service = state.service.clone();
    Ok(Json(blocking(move || service.today(&username, now())).await?))
}
