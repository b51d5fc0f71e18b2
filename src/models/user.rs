use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

/// Account entity as stored in the database.
///
/// Carries the password digest, so it is never serialized to clients;
/// responses use [`UserPublic`].
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i32,
    pub name: String,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public projection of an account: everything a client is allowed to see.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct UserPublic {
    pub id: i32,
    pub name: String,
    pub email: String,
}

impl From<User> for UserPublic {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            name: user.name,
            email: user.email,
        }
    }
}

/// Input payload for creating or replacing an account.
#[derive(Debug, Deserialize, Validate)]
pub struct UserInput {
    #[validate(length(min = 1))]
    pub name: String,

    #[validate(email)]
    pub email: String,

    /// Plaintext password; hashed before it ever reaches the database.
    pub password: String,
}

/// Envelope for the user listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct UserList {
    pub users: Vec<UserPublic>,
}

/// Pagination parameters shared by the list endpoints.
#[derive(Debug, Deserialize)]
pub struct FilterPage {
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}

pub(crate) fn default_limit() -> i64 {
    100
}
