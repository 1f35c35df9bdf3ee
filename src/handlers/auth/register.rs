use axum::{
    Json,
    extract::{Form, State},
    http::StatusCode,
};
use tower_sessions::Session;
use validator::Validate;

use crate::{
    AppState,
    data::models::{RegisterError, RegisterForm, UserProfile},
    data::repositories::UserRepository,
    utils::set_user_session,
};

#[axum::debug_handler]
pub async fn handle_register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<(StatusCode, Json<UserProfile>), RegisterError> {
    form.validate().map_err(RegisterError::from)?;

    let pool = state.service.pool().clone();
    let defaults = state.config.default_profile.clone();

    let profile = tokio::task::spawn_blocking(move || -> Result<UserProfile, RegisterError> {
        let mut conn = pool.get()?;

        if UserRepository::username_exists(&mut conn, &form.username)? {
            log::warn!("Registration attempt with existing username: {}", form.username);
            return Err(RegisterError::UsernameTaken);
        }

        let password_hash = UserRepository::hash_password(&form.password)?;
        let user = UserRepository::create_user(&mut conn, &form.username, &password_hash, &defaults)
            .map_err(|e| {
                log::error!("User creation failed: {}", e);
                RegisterError::DatabaseError(e)
            })?;
        Ok(user.profile())
    })
    .await??;

    set_user_session(&session, &profile.username)
        .await
        .map_err(|e| {
            log::error!("Failed to set session: {:?}", e);
            RegisterError::SessionError("Failed to set user session".into())
        })?;

    log::info!("New user registered: {}", profile.username);
    Ok((StatusCode::CREATED, Json(profile)))
}
