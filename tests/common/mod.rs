//! Shared setup for the integration suites: database provisioning, app
//! assembly and a few request helpers.
//!
//! The suites exercise the real HTTP surface against a live Postgres named
//! by `DATABASE_URL`. When no database is reachable the suites skip rather
//! than fail, so the unit tests still run on machines without Postgres.

#![allow(dead_code)]

use actix_cors::Cors;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{Logger, NormalizePath};
use actix_web::{test, web, App, Error};
use jsonwebtoken::Algorithm;
use serde_json::json;
use sqlx::PgPool;

use todolist::auth::TokenService;
use todolist::config::Config;
use todolist::routes;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";

/// Connects to `DATABASE_URL` and provisions the schema, or returns `None`
/// so the calling test can skip.
pub async fn try_pool() -> Option<PgPool> {
    dotenv::dotenv().ok();

    let database_url = match std::env::var("DATABASE_URL") {
        Ok(url) => url,
        Err(_) => {
            eprintln!("DATABASE_URL not set; skipping integration test");
            return None;
        }
    };

    let pool = match PgPool::connect(&database_url).await {
        Ok(pool) => pool,
        Err(e) => {
            eprintln!("Database unreachable ({}); skipping integration test", e);
            return None;
        }
    };

    provision_schema(&pool)
        .await
        .expect("Failed to provision test schema");

    Some(pool)
}

async fn provision_schema(pool: &PgPool) -> Result<(), sqlx::Error> {
    // Tests run in parallel and all pass through here; the advisory lock
    // keeps concurrent DDL from tripping over itself.
    let mut conn = pool.acquire().await?;

    sqlx::query("SELECT pg_advisory_lock(715001)")
        .execute(&mut *conn)
        .await?;

    let ddl = [
        "DO $$ BEGIN \
             CREATE TYPE todo_state AS ENUM ('draft', 'todo', 'doing', 'done', 'trash'); \
         EXCEPTION WHEN duplicate_object THEN NULL; END $$",
        "CREATE TABLE IF NOT EXISTS users ( \
             id SERIAL PRIMARY KEY, \
             name TEXT NOT NULL, \
             email TEXT NOT NULL UNIQUE, \
             password_hash TEXT NOT NULL, \
             created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
             updated_at TIMESTAMPTZ NOT NULL DEFAULT now())",
        "CREATE TABLE IF NOT EXISTS todos ( \
             id SERIAL PRIMARY KEY, \
             user_id INTEGER NOT NULL REFERENCES users(id) ON DELETE CASCADE, \
             title TEXT NOT NULL, \
             description TEXT NOT NULL, \
             state todo_state NOT NULL, \
             created_at TIMESTAMPTZ NOT NULL DEFAULT now(), \
             updated_at TIMESTAMPTZ NOT NULL DEFAULT now())",
    ];

    let mut result = Ok(());
    for statement in ddl {
        if let Err(e) = sqlx::query(statement).execute(&mut *conn).await {
            result = Err(e);
            break;
        }
    }

    sqlx::query("SELECT pg_advisory_unlock(715001)")
        .execute(&mut *conn)
        .await?;

    result
}

pub fn test_config(expire_minutes: i64) -> Config {
    Config {
        database_url: String::new(),
        server_host: "127.0.0.1".to_string(),
        server_port: 8080,
        jwt_secret: TEST_JWT_SECRET.to_string(),
        jwt_algorithm: Algorithm::HS256,
        access_token_expire_minutes: expire_minutes,
    }
}

pub fn token_service() -> TokenService {
    TokenService::new(&test_config(30))
}

/// Builds the application exactly as `main` wires it, minus the listener.
pub fn build_app(
    pool: PgPool,
    tokens: TokenService,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = Error,
        InitError = (),
    >,
> {
    App::new()
        .app_data(web::Data::new(pool))
        .app_data(web::Data::new(tokens))
        .wrap(
            Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header()
                .max_age(3600),
        )
        .wrap(Logger::default())
        .wrap(NormalizePath::trim())
        .service(routes::health::health)
        .configure(routes::config)
}

/// Registers an account and returns its id.
pub async fn register<S, B>(app: &S, name: &str, email: &str, password: &str) -> i32
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/users/")
        .set_json(json!({
            "name": name,
            "email": email,
            "password": password,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body)
    );

    let user: serde_json::Value = serde_json::from_slice(&body).unwrap();
    user["id"].as_i64().expect("user id") as i32
}

/// Logs in and returns the bearer token.
pub async fn login_token<S, B>(app: &S, email: &str, password: &str) -> String
where
    S: Service<actix_http::Request, Response = ServiceResponse<B>, Error = Error>,
    B: MessageBody,
{
    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(json!({
            "email": email,
            "password": password,
        }))
        .to_request();
    let resp = test::call_service(app, req).await;
    let status = resp.status();
    let body = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::OK,
        "Login failed. Body: {:?}",
        String::from_utf8_lossy(&body)
    );

    let token: serde_json::Value = serde_json::from_slice(&body).unwrap();
    assert_eq!(token["token_type"], "Bearer");
    token["access_token"].as_str().expect("access token").to_string()
}

/// Removes an account (and, through the cascade, its todos) between runs.
pub async fn delete_user_by_email(pool: &PgPool, email: &str) {
    let _ = sqlx::query("DELETE FROM users WHERE email = $1")
        .bind(email)
        .execute(pool)
        .await;
}
