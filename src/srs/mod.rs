//! Spaced-repetition scheduling core: the answer state machine, the daily
//! quota accountant and the next-card selector, written against the store
//! traits in [`store`].

pub mod error;
pub mod quota;
pub mod scheduler;
pub mod selector;
pub mod store;

pub use error::SrsError;
pub use quota::LimitKind;
pub use scheduler::record_answer;
pub use selector::{select_next, Pool};
pub use store::{LimitsStore, ScheduleStore};
