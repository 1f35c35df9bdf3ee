use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

const USERNAME_KEY: &str = "username";

/// Marks the session as logged in. The session id is rotated first.
pub async fn set_user_session(session: &Session, username: &str) -> Result<(), SessionError> {
    session.cycle_id().await?;
    session.insert(USERNAME_KEY, username).await?;
    Ok(())
}

pub async fn clear_user_session(session: &Session) -> Result<(), SessionError> {
    session.flush().await
}

/// Logged-in username, `None` for an anonymous session.
pub async fn current_username(session: &Session) -> Result<Option<String>, SessionError> {
    session.get::<String>(USERNAME_KEY).await.map_err(|e| {
        log::error!("Failed to get username from session: {}", e);
        e
    })
}
