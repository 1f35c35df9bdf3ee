use axum::{
    Json,
    extract::{Form, State},
};
use tower_sessions::Session;

use crate::{
    AppState,
    data::models::{ApiResponse, LoginError, LoginForm},
    data::repositories::UserRepository,
    utils::{clear_user_session, set_user_session},
};

#[axum::debug_handler]
pub async fn handle_login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Json<ApiResponse>, LoginError> {
    let pool = state.service.pool().clone();
    let username = form.username.clone();

    let is_valid = tokio::task::spawn_blocking(move || -> Result<bool, LoginError> {
        let mut conn = pool.get()?;

        let user = UserRepository::find_by_username(&mut conn, &form.username).map_err(|e| {
            log::error!("Database error during login: {}", e);
            LoginError::DatabaseError(e)
        })?;

        match user {
            Some(user) => UserRepository::verify_password(&user.password, &form.password).map_err(|e| {
                log::error!("Password verification failed: {}", e);
                LoginError::HashingError(e)
            }),
            None => {
                log::warn!("User not found: {}", form.username);
                Ok(false)
            }
        }
    })
    .await??;

    if !is_valid {
        log::warn!("Invalid login for user: {}", username);
        return Err(LoginError::InvalidCredentials);
    }

    set_user_session(&session, &username).await?;
    log::info!("{} logged in", username);
    Ok(Json(ApiResponse {
        success: true,
        message: format!("Logged in as {username}"),
    }))
}

pub async fn handle_logout(session: Session) -> Result<Json<ApiResponse>, LoginError> {
    clear_user_session(&session).await.map_err(|e| {
        log::error!("Failed to delete session: {}", e);
        LoginError::SessionError("Failed to logout".into())
    })?;
    Ok(Json(ApiResponse {
        success: true,
        message: "Logged out".to_string(),
    }))
}
