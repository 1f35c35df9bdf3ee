pub mod session;

pub use session::{clear_user_session, current_username, set_user_session};
