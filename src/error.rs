//!
//! # Custom Error Handling
//!
//! This module defines the custom error type `AppError` used throughout the
//! application. It centralizes error management, providing a consistent way
//! to represent every failure the service can produce, from database issues
//! to rejected credentials.
//!
//! `AppError` implements `actix_web::error::ResponseError`, so a handler can
//! return `Result<_, AppError>` and have each error kind rendered as its
//! fixed HTTP status with a `{"detail": "..."}` JSON body. `From`
//! implementations for `sqlx::Error`, `validator::ValidationErrors`,
//! `jsonwebtoken::errors::Error` and `bcrypt::BcryptError` keep the `?`
//! operator usable at every call site.

use actix_web::{error::ResponseError, HttpResponse};
use serde_json::json;
use std::fmt;
use validator::ValidationErrors;

/// Message returned for every failure while resolving a bearer token to an
/// account. Deliberately generic: callers must not learn whether the token
/// was malformed, expired, or pointed at a deleted account.
pub const CREDENTIALS_MESSAGE: &str = "Could not validate credentials.";

/// Represents all possible errors that can occur within the application.
///
/// Each variant corresponds to one outcome kind of the error taxonomy and
/// carries the client-facing message. The boundary maps each kind to its
/// fixed HTTP status; nothing is retried and nothing is swallowed.
#[derive(Debug)]
pub enum AppError {
    /// A bearer token was missing, invalid, expired, or its subject no
    /// longer resolves to an account (HTTP 401, generic message).
    Unauthorized(String),
    /// Login with a wrong email/password pair (HTTP 401, distinct message).
    AuthenticationFailed(String),
    /// Authenticated, but not the owner of the target resource (HTTP 403).
    Forbidden(String),
    /// A malformed or undeserializable request (HTTP 400).
    BadRequest(String),
    /// The requested resource does not exist — or, for todos, is not owned
    /// by the caller (HTTP 404).
    NotFound(String),
    /// A uniqueness constraint was violated on write (HTTP 409).
    Conflict(String),
    /// Failed input validation on a deserialized payload (HTTP 422).
    ValidationError(String),
    /// An unexpected server-side error (HTTP 500).
    InternalServerError(String),
    /// An error originating from the persistence layer (HTTP 500).
    DatabaseError(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Unauthorized(msg) => write!(f, "Unauthorized: {}", msg),
            AppError::AuthenticationFailed(msg) => write!(f, "Authentication failed: {}", msg),
            AppError::Forbidden(msg) => write!(f, "Forbidden: {}", msg),
            AppError::BadRequest(msg) => write!(f, "Bad Request: {}", msg),
            AppError::NotFound(msg) => write!(f, "Not Found: {}", msg),
            AppError::Conflict(msg) => write!(f, "Conflict: {}", msg),
            AppError::ValidationError(msg) => write!(f, "Validation Error: {}", msg),
            AppError::InternalServerError(msg) => write!(f, "Internal Server Error: {}", msg),
            AppError::DatabaseError(msg) => write!(f, "Database Error: {}", msg),
        }
    }
}

/// Converts `AppError` variants into `HttpResponse` objects.
///
/// This implementation allows Actix Web to automatically translate
/// `AppError` results from handlers into the correct HTTP status codes and
/// `{"detail": ...}` JSON bodies.
impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Unauthorized(msg) => HttpResponse::Unauthorized().json(json!({
                "detail": msg
            })),
            AppError::AuthenticationFailed(msg) => HttpResponse::Unauthorized().json(json!({
                "detail": msg
            })),
            AppError::Forbidden(msg) => HttpResponse::Forbidden().json(json!({
                "detail": msg
            })),
            AppError::BadRequest(msg) => HttpResponse::BadRequest().json(json!({
                "detail": msg
            })),
            AppError::NotFound(msg) => HttpResponse::NotFound().json(json!({
                "detail": msg
            })),
            AppError::Conflict(msg) => HttpResponse::Conflict().json(json!({
                "detail": msg
            })),
            AppError::ValidationError(msg) => HttpResponse::UnprocessableEntity().json(json!({
                "detail": msg
            })),
            AppError::InternalServerError(msg) => HttpResponse::InternalServerError().json(json!({
                "detail": msg
            })),
            // Database errors are presented as generic internal server errors.
            AppError::DatabaseError(msg) => HttpResponse::InternalServerError().json(json!({
                "detail": msg
            })),
        }
    }
}

/// Converts `sqlx::Error` into `AppError`.
///
/// `sqlx::Error::RowNotFound` maps to `AppError::NotFound`; a unique
/// constraint violation maps to `AppError::Conflict` (handlers that need a
/// resource-specific conflict message map it themselves before `?`); other
/// database errors become `AppError::DatabaseError`.
impl From<sqlx::Error> for AppError {
    fn from(error: sqlx::Error) -> AppError {
        match &error {
            sqlx::Error::RowNotFound => AppError::NotFound("Record not found".into()),
            sqlx::Error::Database(db_err) if db_err.is_unique_violation() => {
                AppError::Conflict("Resource already exists.".into())
            }
            _ => AppError::DatabaseError(error.to_string()),
        }
    }
}

/// Converts `validator::ValidationErrors` into `AppError::ValidationError`,
/// preserving the detailed messages.
impl From<ValidationErrors> for AppError {
    fn from(error: ValidationErrors) -> AppError {
        AppError::ValidationError(error.to_string())
    }
}

/// Converts `jsonwebtoken::errors::Error` into `AppError::Unauthorized`.
///
/// The original cause is discarded on purpose: token failures always carry
/// the generic credentials message.
impl From<jsonwebtoken::errors::Error> for AppError {
    fn from(_: jsonwebtoken::errors::Error) -> AppError {
        AppError::Unauthorized(CREDENTIALS_MESSAGE.into())
    }
}

/// Converts `bcrypt::BcryptError` into `AppError::InternalServerError`.
///
/// Only the hashing path propagates bcrypt errors; verification folds every
/// failure into a mismatch.
impl From<bcrypt::BcryptError> for AppError {
    fn from(error: bcrypt::BcryptError) -> AppError {
        AppError::InternalServerError(error.to_string())
    }
}
