pub mod authorize;
pub mod extractors;
pub mod password;
pub mod token;

use serde::{Deserialize, Serialize};
use validator::Validate;

// Re-export necessary items
pub use authorize::require_ownership;
pub use extractors::CurrentUser;
pub use password::{hash_password, verify_password};
pub use token::{Claims, TokenService};

/// Represents the payload for a login request.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginRequest {
    /// Account email, used as the lookup key and the token subject.
    #[validate(email)]
    pub email: String,
    /// Account password in plaintext, verified against the stored digest.
    pub password: String,
}

/// Response structure after a successful login or token refresh.
#[derive(Debug, Serialize, Deserialize)]
pub struct Token {
    /// The signed access token.
    pub access_token: String,
    /// Fixed scheme literal, always "Bearer".
    pub token_type: String,
}

impl Token {
    pub fn bearer(access_token: String) -> Self {
        Self {
            access_token,
            token_type: "Bearer".to_string(),
        }
    }
}
