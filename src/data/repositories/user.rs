use crate::data::models::{NewUser, UpdateSettingsRequest, User, UserProfile};
use crate::schema::users;
use bcrypt::verify;
use bcrypt::{DEFAULT_COST, hash};
use diesel::prelude::*;

pub struct UserRepository;

impl UserRepository {
    pub fn find_by_username(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<Option<User>, diesel::result::Error> {
        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first::<User>(conn)
            .optional()
    }

    pub fn verify_password(
        stored_hash: &str,
        input_password: &str,
    ) -> Result<bool, bcrypt::BcryptError> {
        verify(input_password, stored_hash)
    }

    pub fn hash_password(password: &str) -> Result<String, bcrypt::BcryptError> {
        hash(password, DEFAULT_COST)
    }

    /// Inserts a user whose scheduling parameters start from `defaults`.
    pub fn create_user(
        conn: &mut SqliteConnection,
        username: &str,
        password_hash: &str,
        defaults: &UserProfile,
    ) -> Result<User, diesel::result::Error> {
        diesel::insert_into(users::table)
            .values(&NewUser {
                username,
                password: password_hash,
                bonus: defaults.bonus,
                punishment: defaults.punishment,
                new_limit: defaults.new_limit,
                due_limit: defaults.due_limit,
            })
            .execute(conn)?;

        users::table
            .filter(users::username.eq(username))
            .select(User::as_select())
            .first::<User>(conn)
    }

    pub fn username_exists(
        conn: &mut SqliteConnection,
        username: &str,
    ) -> Result<bool, diesel::result::Error> {
        use diesel::dsl::exists;
        use diesel::select;

        select(exists(users::table.filter(users::username.eq(username)))).get_result(conn)
    }

    pub fn update_settings(
        conn: &mut SqliteConnection,
        username: &str,
        settings: &UpdateSettingsRequest,
    ) -> Result<usize, diesel::result::Error> {
        diesel::update(users::table.filter(users::username.eq(username)))
            .set(settings)
            .execute(conn)
    }
}
