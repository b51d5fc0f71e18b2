use crate::{
    auth::{hash_password, require_ownership, CurrentUser},
    error::AppError,
    models::{FilterPage, User, UserInput, UserList, UserPublic},
};
use actix_web::{delete, get, post, put, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const EMAIL_CONFLICT: &str = "Already exists a user with this email.";

/// Maps a unique-constraint violation on the email column to the contract
/// conflict message; everything else takes the default conversion.
fn email_conflict(error: sqlx::Error) -> AppError {
    if let sqlx::Error::Database(db_err) = &error {
        if db_err.is_unique_violation() {
            return AppError::Conflict(EMAIL_CONFLICT.into());
        }
    }
    AppError::from(error)
}

/// Creates a new account. Open endpoint: this is how users register.
///
/// The plaintext password is hashed before the insert; the response carries
/// the public projection only.
#[post("")]
pub async fn create_user(
    pool: web::Data<PgPool>,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;

    let existing = sqlx::query_scalar::<_, i32>("SELECT id FROM users WHERE email = $1")
        .bind(&user_data.email)
        .fetch_optional(&**pool)
        .await?;

    if existing.is_some() {
        return Err(AppError::Conflict(EMAIL_CONFLICT.into()));
    }

    let password_hash = hash_password(&user_data.password)?;

    // The unique index still backstops the pre-check above: two concurrent
    // registrations for the same email surface as the same conflict.
    let user = sqlx::query_as::<_, User>(
        "INSERT INTO users (name, email, password_hash) VALUES ($1, $2, $3) \
         RETURNING id, name, email, password_hash, created_at, updated_at",
    )
    .bind(&user_data.name)
    .bind(&user_data.email)
    .bind(&password_hash)
    .fetch_one(&**pool)
    .await
    .map_err(email_conflict)?;

    Ok(HttpResponse::Created().json(UserPublic::from(user)))
}

/// Lists accounts, paginated by `limit` and `offset`.
#[get("")]
pub async fn list_users(
    pool: web::Data<PgPool>,
    _current_user: CurrentUser,
    filter: web::Query<FilterPage>,
) -> Result<impl Responder, AppError> {
    let users = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at, updated_at \
         FROM users ORDER BY id LIMIT $1 OFFSET $2",
    )
    .bind(filter.limit)
    .bind(filter.offset)
    .fetch_all(&**pool)
    .await?;

    Ok(HttpResponse::Ok().json(UserList {
        users: users.into_iter().map(UserPublic::from).collect(),
    }))
}

/// Retrieves a single account by id. Open endpoint; ids are public.
#[get("/{user_id}")]
pub async fn get_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let user = sqlx::query_as::<_, User>(
        "SELECT id, name, email, password_hash, created_at, updated_at \
         FROM users WHERE id = $1",
    )
    .bind(user_id.into_inner())
    .fetch_optional(&**pool)
    .await?;

    match user {
        Some(user) => Ok(HttpResponse::Ok().json(UserPublic::from(user))),
        None => Err(AppError::NotFound("User not found.".into())),
    }
}

/// Replaces an account's name, email and password.
///
/// Only the account itself may do this; acting on another account is
/// Forbidden rather than Not Found, since account ids are already public
/// through `GET /users/{id}`.
#[put("/{user_id}")]
pub async fn update_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    current_user: CurrentUser,
    user_data: web::Json<UserInput>,
) -> Result<impl Responder, AppError> {
    user_data.validate()?;
    require_ownership(&current_user.0, *user_id)?;

    let password_hash = hash_password(&user_data.password)?;

    let user = sqlx::query_as::<_, User>(
        "UPDATE users SET name = $1, email = $2, password_hash = $3 WHERE id = $4 \
         RETURNING id, name, email, password_hash, created_at, updated_at",
    )
    .bind(&user_data.name)
    .bind(&user_data.email)
    .bind(&password_hash)
    .bind(user_id.into_inner())
    .fetch_one(&**pool)
    .await
    .map_err(email_conflict)?;

    Ok(HttpResponse::Ok().json(UserPublic::from(user)))
}

/// Deletes an account. Same ownership rule as updates.
#[delete("/{user_id}")]
pub async fn delete_user(
    pool: web::Data<PgPool>,
    user_id: web::Path<i32>,
    current_user: CurrentUser,
) -> Result<impl Responder, AppError> {
    require_ownership(&current_user.0, *user_id)?;

    sqlx::query("DELETE FROM users WHERE id = $1")
        .bind(user_id.into_inner())
        .execute(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "User deleted."
    })))
}
