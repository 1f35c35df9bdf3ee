use bcrypt::BcryptError;
use diesel::result::Error as DieselError;
use tower_sessions::session::Error as SessionError;
use validator::ValidationErrors;

use crate::data::models::{LoginError, RegisterError};

impl From<DieselError> for LoginError {
    fn from(err: DieselError) -> Self {
        LoginError::DatabaseError(err)
    }
}

impl From<BcryptError> for LoginError {
    fn from(err: BcryptError) -> Self {
        LoginError::HashingError(err)
    }
}

impl From<SessionError> for LoginError {
    fn from(err: SessionError) -> Self {
        LoginError::SessionError(err.to_string())
    }
}

impl From<r2d2::Error> for LoginError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Failed to get DB connection: {}", err);
        LoginError::SessionError("Failed to get DB connection".into())
    }
}

impl From<BcryptError> for RegisterError {
    fn from(err: BcryptError) -> Self {
        RegisterError::HashingError(err)
    }
}

impl From<SessionError> for RegisterError {
    fn from(err: SessionError) -> Self {
        RegisterError::SessionError(err.to_string())
    }
}

impl From<ValidationErrors> for RegisterError {
    fn from(err: ValidationErrors) -> Self {
        RegisterError::ValidationError(err.to_string())
    }
}

impl From<r2d2::Error> for RegisterError {
    fn from(err: r2d2::Error) -> Self {
        log::error!("Failed to get DB connection: {}", err);
        RegisterError::SessionError("Failed to get DB connection".into())
    }
}

impl From<tokio::task::JoinError> for LoginError {
    fn from(err: tokio::task::JoinError) -> Self {
        LoginError::SessionError(format!("Login task failed: {err}"))
    }
}

impl From<tokio::task::JoinError> for RegisterError {
    fn from(err: tokio::task::JoinError) -> Self {
        RegisterError::SessionError(format!("Registration task failed: {err}"))
    }
}
