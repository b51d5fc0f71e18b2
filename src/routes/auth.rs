use crate::{
    auth::{verify_password, CurrentUser, LoginRequest, Token, TokenService},
    error::AppError,
    models::User,
};
use actix_web::{post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

/// Login
///
/// Exchanges an email/password pair for a bearer token. The same error is
/// returned whether the email is unknown or the password is wrong.
#[post("/login")]
pub async fn login(
    pool: web::Data<PgPool>,
    tokens: web::Data<TokenService>,
    login_data: web::Json<LoginRequest>,
) -> Result<impl Responder, AppError> {
    login_data.validate()?;

    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at, updated_at \
         FROM users WHERE email = $1",
    )
    .bind(&login_data.email)
    .fetch_optional(&**pool)
    .await?;

    let user = match user {
        Some(user) if verify_password(&login_data.password, &user.password_hash) => user,
        _ => {
            return Err(AppError::AuthenticationFailed(
                "Incorret email or password".into(),
            ))
        }
    };

    let access_token = tokens.issue(&user.email)?;

    Ok(HttpResponse::Ok().json(Token::bearer(access_token)))
}

/// Refresh token
///
/// Issues a fresh token for an already-authenticated account without
/// re-checking the password. The presented token is left untouched and
/// stays valid until its own expiry.
#[post("/refresh_token")]
pub async fn refresh_token(
    tokens: web::Data<TokenService>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    let access_token = tokens.issue(&current_user.0.email)?;

    Ok(HttpResponse::Ok().json(Token::bearer(access_token)))
}
