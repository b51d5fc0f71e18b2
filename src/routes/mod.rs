pub mod auth;
pub mod health;
pub mod todos;
pub mod users;

use actix_web::web;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/auth")
            .service(auth::login)
            .service(auth::refresh_token),
    )
    .service(
        web::scope("/users")
            .service(users::create_user)
            .service(users::list_users)
            .service(users::get_user)
            .service(users::update_user)
            .service(users::delete_user),
    )
    .service(
        web::scope("/todos")
            .service(todos::create_todo)
            .service(todos::list_todos)
            .service(todos::update_todo)
            .service(todos::delete_todo),
    );
}
