use crate::{
    auth::CurrentUser,
    error::AppError,
    models::{FilterTodo, Todo, TodoInput, TodoList, TodoPublic, TodoUpdate},
};
use actix_web::{delete, get, patch, post, web, HttpResponse, Responder};
use sqlx::PgPool;
use validator::Validate;

const TODO_COLUMNS: &str = "id, user_id, title, description, state, created_at, updated_at";

/// Creates a todo owned by the authenticated account.
#[post("")]
pub async fn create_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_data: web::Json<TodoInput>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = sqlx::query_as::<_, Todo>(&format!(
        "INSERT INTO todos (user_id, title, description, state) VALUES ($1, $2, $3, $4) \
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(current_user.0.id)
    .bind(&todo_data.title)
    .bind(&todo_data.description)
    .bind(todo_data.state)
    .fetch_one(&**pool)
    .await?;

    Ok(HttpResponse::Created().json(TodoPublic::from(todo)))
}

/// Lists the authenticated account's todos.
///
/// Every query is scoped to the owner, so no filter combination can surface
/// another account's todos. `title`, `description` and `state` are substring
/// filters; results come back in insertion order, paginated by `limit` and
/// `offset`.
#[get("")]
pub async fn list_todos(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    filter: web::Query<FilterTodo>,
) -> Result<impl Responder, AppError> {
    let mut sql = format!("SELECT {} FROM todos WHERE user_id = $1", TODO_COLUMNS);
    let mut param_count = 2;

    if filter.title.is_some() {
        sql.push_str(&format!(" AND title LIKE ${}", param_count));
        param_count += 1;
    }
    if filter.description.is_some() {
        sql.push_str(&format!(" AND description LIKE ${}", param_count));
        param_count += 1;
    }
    if filter.state.is_some() {
        sql.push_str(&format!(" AND CAST(state AS TEXT) LIKE ${}", param_count));
        param_count += 1;
    }

    sql.push_str(&format!(
        " ORDER BY id LIMIT ${} OFFSET ${}",
        param_count,
        param_count + 1
    ));

    let mut query = sqlx::query_as::<_, Todo>(&sql).bind(current_user.0.id);

    if let Some(title) = &filter.title {
        query = query.bind(format!("%{}%", title));
    }
    if let Some(description) = &filter.description {
        query = query.bind(format!("%{}%", description));
    }
    if let Some(state) = &filter.state {
        query = query.bind(format!("%{}%", state));
    }

    let todos = query
        .bind(filter.limit)
        .bind(filter.offset)
        .fetch_all(&**pool)
        .await?;

    Ok(HttpResponse::Ok().json(TodoList {
        todos: todos.into_iter().map(TodoPublic::from).collect(),
    }))
}

/// Partially updates a todo; absent fields keep their stored value.
///
/// The update is scoped to the owner in the same statement, so a todo that
/// exists but belongs to someone else reports the same 404 as one that
/// doesn't exist at all.
#[patch("/{todo_id}")]
pub async fn update_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<i32>,
    todo_data: web::Json<TodoUpdate>,
) -> Result<impl Responder, AppError> {
    todo_data.validate()?;

    let todo = sqlx::query_as::<_, Todo>(&format!(
        "UPDATE todos SET title = COALESCE($1, title), \
         description = COALESCE($2, description), \
         state = COALESCE($3, state), \
         updated_at = now() \
         WHERE id = $4 AND user_id = $5 \
         RETURNING {}",
        TODO_COLUMNS
    ))
    .bind(&todo_data.title)
    .bind(&todo_data.description)
    .bind(todo_data.state)
    .bind(todo_id.into_inner())
    .bind(current_user.0.id)
    .fetch_optional(&**pool)
    .await?;

    match todo {
        Some(todo) => Ok(HttpResponse::Ok().json(TodoPublic::from(todo))),
        None => Err(AppError::NotFound("Task not found.".into())),
    }
}

/// Deletes a todo, with the same owner-scoped 404 behavior as updates.
#[delete("/{todo_id}")]
pub async fn delete_todo(
    pool: web::Data<PgPool>,
    current_user: CurrentUser,
    todo_id: web::Path<i32>,
) -> Result<impl Responder, AppError> {
    let result = sqlx::query("DELETE FROM todos WHERE id = $1 AND user_id = $2")
        .bind(todo_id.into_inner())
        .bind(current_user.0.id)
        .execute(&**pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(AppError::NotFound("Task not found.".into()));
    }

    Ok(HttpResponse::Ok().json(serde_json::json!({
        "message": "Task has been deleted successfully."
    })))
}
