use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

use crate::srs::SrsError;

/// Errors returned by the study, card, stats and backup endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Not logged in")]
    Unauthorized,
    #[error(transparent)]
    Srs(#[from] SrsError),
    #[error("Session error: {0}")]
    Session(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::Srs(SrsError::NotFound(_)) => StatusCode::NOT_FOUND,
            ApiError::Srs(SrsError::InvalidInput(_)) => StatusCode::BAD_REQUEST,
            ApiError::Srs(SrsError::ConcurrencyConflict) => StatusCode::CONFLICT,
            ApiError::Srs(_) | ApiError::Session(_) | ApiError::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl From<tower_sessions::session::Error> for ApiError {
    fn from(err: tower_sessions::session::Error) -> Self {
        ApiError::Session(err.to_string())
    }
}

impl From<tokio::task::JoinError> for ApiError {
    fn from(err: tokio::task::JoinError) -> Self {
        ApiError::Internal(format!("Blocking task failed: {err}"))
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        if status.is_server_error() {
            log::error!("Request failed: {}", self);
        }
        error_body(status, self.to_string())
    }
}

/// JSON body shared by every error response.
pub fn error_body(status: StatusCode, message: String) -> Response {
    let body = json!({
        "error": message,
        "status": status.as_u16()
    });

    (status, axum::Json(body)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_core_errors_to_statuses() {
        let cases = [
            (ApiError::Srs(SrsError::NotFound("x".into())), StatusCode::NOT_FOUND),
            (ApiError::Srs(SrsError::InvalidInput("x".into())), StatusCode::BAD_REQUEST),
            (ApiError::Srs(SrsError::ConcurrencyConflict), StatusCode::CONFLICT),
            (
                ApiError::Srs(SrsError::InconsistentState("x".into())),
                StatusCode::INTERNAL_SERVER_ERROR,
            ),
            (ApiError::Unauthorized, StatusCode::UNAUTHORIZED),
        ];
        for (err, expected) in cases {
            assert_eq!(err.status(), expected, "{err}");
        }
    }

    #[test]
    fn unreadable_session_is_a_server_error() {
        let decode = serde_json::from_str::<String>("42").unwrap_err();
        let err = ApiError::from(tower_sessions::session::Error::SerdeJson(decode));
        assert!(matches!(err, ApiError::Session(_)));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn serialization_failures_are_server_errors() {
        let err = ApiError::Srs(SrsError::Serialization("csv".into()));
        assert_eq!(err.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn response_carries_status_code() {
        let response = ApiError::Unauthorized.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}
