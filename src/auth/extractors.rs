use actix_web::dev::Payload;
use actix_web::http::header;
use actix_web::{web, Error as ActixError, FromRequest, HttpRequest};
use futures::future::LocalBoxFuture;
use sqlx::PgPool;

use crate::auth::token::TokenService;
use crate::error::{AppError, CREDENTIALS_MESSAGE};
use crate::models::User;

/// Resolves the request's bearer token to the authenticated account.
///
/// Handlers that require an authenticated identity take `CurrentUser` as a
/// parameter; public handlers simply don't. Resolution reads the
/// `Authorization: Bearer <token>` header, validates the token through
/// [`TokenService`], and looks the subject email up in the database.
///
/// A missing header, an invalid or expired token, a failed lookup and a
/// subject with no matching account all produce the same generic
/// unauthorized error: the resolver fails closed and never reveals which
/// step rejected the request.
#[derive(Debug)]
pub struct CurrentUser(pub User);

fn bearer_token(req: &HttpRequest) -> Option<String> {
    req.headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .map(|token| token.to_string())
}

impl FromRequest for CurrentUser {
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let req = req.clone();
        Box::pin(async move {
            let unauthorized = || AppError::Unauthorized(CREDENTIALS_MESSAGE.into());

            let token = bearer_token(&req).ok_or_else(unauthorized)?;

            let tokens = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
                AppError::InternalServerError("TokenService is not configured".into())
            })?;
            let pool = req.app_data::<web::Data<PgPool>>().ok_or_else(|| {
                AppError::InternalServerError("Database pool is not configured".into())
            })?;

            let subject = tokens.validate(&token)?;

            let user = sqlx::query_as::<_, User>(
                "SELECT id, name, email, password_hash, created_at, updated_at \
                 FROM users WHERE email = $1",
            )
            .bind(&subject)
            .fetch_optional(pool.get_ref())
            .await
            .map_err(|_| unauthorized())?
            .ok_or_else(unauthorized)?;

            Ok(CurrentUser(user))
        })
    }
}
