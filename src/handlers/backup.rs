use axum::{
    Router,
    extract::State,
    http::header,
    response::IntoResponse,
    routing::get,
};
use tower_sessions::Session;

use super::{blocking, current_profile};
use crate::AppState;
use crate::features::ApiError;
use crate::features::backup::{BACKUP_FILENAME, write_backup};

pub fn backup_router() -> Router<AppState> {
    Router::new().route("/export", get(export))
}

async fn export(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, ApiError> {
    let username = current_profile(&state, &session).await?.username;
    let service = state.service.clone();
    let csv = blocking(move || {
        let rows = service.backup_rows(&username)?;
        log::info!("Exporting {} schedules for {}", rows.len(), username);
        write_backup(&rows)
    })
    .await?;

    Ok((
        [
            (header::CONTENT_TYPE, "text/csv; charset=utf-8".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{BACKUP_FILENAME}\""),
            ),
        ],
        csv,
    ))
}
