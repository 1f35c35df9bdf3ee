pub mod login;
pub mod register;

use axum::Router;
use axum::routing::{get, post};

use crate::AppState;

pub fn auth_router() -> Router<AppState> {
    Router::new()
        .route("/login", post(login::handle_login))
        .route("/logout", get(login::handle_logout))
        .route("/register", post(register::handle_register))
}
