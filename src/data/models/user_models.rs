use diesel::{AsChangeset, Insertable, Queryable, Selectable};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::schema::users;

#[derive(Debug, Clone, Queryable, Selectable)]
#[diesel(table_name = users)]
#[diesel(check_for_backend(diesel::sqlite::Sqlite))]
pub struct User {
    pub username: String,
    pub password: String,
    pub bonus: f64,
    pub punishment: f64,
    pub new_limit: i32,
    pub due_limit: i32,
}

impl User {
    pub fn profile(&self) -> UserProfile {
        UserProfile {
            username: self.username.clone(),
            bonus: self.bonus,
            punishment: self.punishment,
            new_limit: self.new_limit,
            due_limit: self.due_limit,
        }
    }
}

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub username: &'a str,
    pub password: &'a str,
    pub bonus: f64,
    pub punishment: f64,
    pub new_limit: i32,
    pub due_limit: i32,
}

/// Per-user scheduling parameters
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub username: String,
    pub bonus: f64,      // Ease multiplier on a correct answer, > 1
    pub punishment: f64, // Ease multiplier on a lapse, in (0, 1)
    pub new_limit: i32,  // Daily NEW quota
    pub due_limit: i32,  // Daily DUE quota
}

/// Request payload for `PUT /api/settings`
#[derive(Debug, Deserialize, Validate, AsChangeset)]
#[diesel(table_name = users)]
pub struct UpdateSettingsRequest {
    #[validate(custom(function = "validate_bonus"))]
    pub bonus: f64,
    #[validate(custom(function = "validate_punishment"))]
    pub punishment: f64,
    #[validate(range(min = 0, message = "new_limit must not be negative"))]
    pub new_limit: i32,
    #[validate(range(min = 0, message = "due_limit must not be negative"))]
    pub due_limit: i32,
}

fn validate_bonus(bonus: f64) -> Result<(), ValidationError> {
    if bonus.is_finite() && bonus > 1.0 {
        Ok(())
    } else {
        Err(ValidationError::new("bonus_must_exceed_one"))
    }
}

/// Smallest accepted punishment; anything lower wipes out ease after a lapse or two.
pub const MIN_PUNISHMENT: f64 = 0.1;

fn validate_punishment(punishment: f64) -> Result<(), ValidationError> {
    if punishment.is_finite() && punishment >= MIN_PUNISHMENT && punishment < 1.0 {
        Ok(())
    } else {
        Err(ValidationError::new("punishment_out_of_range"))
    }
}
