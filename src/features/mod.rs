pub mod auth;
pub mod backup;
pub mod error;
pub mod stats;
pub mod study;

pub use error::{ApiError, error_body};
