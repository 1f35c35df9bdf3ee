pub mod auth_models;
pub mod card_models;
pub mod history_models;
pub mod limits_models;
pub mod schedule_models;
pub mod stats_models;
pub mod study_models;
pub mod user_models;

pub use auth_models::{LoginError, RegisterError, RegisterForm, LoginForm};
pub use card_models::{BulkCreateRequest, BulkCreateResponse, Card, CreateCardRequest};
pub use history_models::NewHistory;
pub use limits_models::{Limits, NewLimits};
pub use schedule_models::{CardStatus, NewSchedule, Schedule, DEFAULT_EASE};
pub use stats_models::{DayCount, DaysParams, HardestCard, LimitParams, StatsOverview, TodayStats};
pub use study_models::{Answer, ApiResponse, IncreaseLimitsRequest, ScheduleAmount};
pub use user_models::{NewUser, UpdateSettingsRequest, User, UserProfile};
