use crate::config::Config;
use crate::error::{AppError, CREDENTIALS_MESSAGE};
use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};

/// Represents the claims encoded within an access token.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject of the token: the account's email address.
    pub sub: String,
    /// Expiration timestamp (seconds since epoch) for the token.
    pub exp: usize,
}

/// Issues and validates signed, expiring bearer tokens.
///
/// Built once from [`Config`] at startup and shared across workers via
/// `web::Data`. The service holds only the derived signing keys, the
/// algorithm and the TTL; tokens themselves are stateless, so any process
/// configured with the same secret can validate tokens issued by another.
/// There is no server-side revocation: a token stays valid until its own
/// expiry.
#[derive(Clone)]
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    algorithm: Algorithm,
    ttl: Duration,
}

impl TokenService {
    pub fn new(config: &Config) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(config.jwt_secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(config.jwt_secret.as_bytes()),
            algorithm: config.jwt_algorithm,
            ttl: Duration::minutes(config.access_token_expire_minutes),
        }
    }

    /// Issues a signed token for the given subject, expiring one TTL from
    /// now.
    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        let expiration = Utc::now()
            .checked_add_signed(self.ttl)
            .expect("valid timestamp")
            .timestamp() as usize;

        let claims = Claims {
            sub: subject.to_string(),
            exp: expiration,
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding_key)
            .map_err(|e| AppError::InternalServerError(format!("Failed to generate token: {}", e)))
    }

    /// Verifies a token and returns its subject.
    ///
    /// Rejects a bad signature, a wrong algorithm, a missing or empty `sub`
    /// claim, and an expired token. Expiry is strict (zero leeway): the
    /// token is invalid the moment now > exp. Every rejection carries the
    /// same generic message, so callers cannot tell which check failed.
    pub fn validate(&self, token: &str) -> Result<String, AppError> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let data = decode::<Claims>(token, &self.decoding_key, &validation)?;

        if data.claims.sub.is_empty() {
            return Err(AppError::Unauthorized(CREDENTIALS_MESSAGE.into()));
        }

        Ok(data.claims.sub)
    }
}
