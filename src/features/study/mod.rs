pub mod retry;
pub mod service;

pub use retry::{MAX_ATTEMPTS, retry_on_conflict};
pub use service::StudyService;
