pub mod card;
pub mod history;
pub mod schedule;
pub mod user;

pub use card::CardRepository;
pub use history::HistoryRepository;
pub use schedule::SqliteStore;
pub use user::UserRepository;
