use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use super::user::default_limit;

/// Workflow state of a todo.
/// Corresponds to the `todo_state` SQL enum; the set is closed and invalid
/// values are rejected when the request body is deserialized.
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "todo_state", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TodoState {
    /// Sketched out, not yet committed to.
    Draft,
    /// Ready to be worked on.
    Todo,
    /// Currently in progress.
    Doing,
    /// Finished.
    Done,
    /// Discarded without being done.
    Trash,
}

/// Represents a todo entity as stored in the database.
#[derive(Debug, FromRow)]
pub struct Todo {
    pub id: i32,
    /// Identifier of the account that owns this todo.
    pub user_id: i32,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Public representation of a todo. The owner id is implicit — clients only
/// ever see their own todos.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, FromRow)]
pub struct TodoPublic {
    pub id: i32,
    pub title: String,
    pub description: String,
    pub state: TodoState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Todo> for TodoPublic {
    fn from(todo: Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title,
            description: todo.description,
            state: todo.state,
            created_at: todo.created_at,
            updated_at: todo.updated_at,
        }
    }
}

/// Input payload for creating a todo.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoInput {
    #[validate(length(min = 1))]
    pub title: String,

    pub description: String,

    pub state: TodoState,
}

/// Partial update payload: absent fields keep their stored value.
#[derive(Debug, Deserialize, Validate)]
pub struct TodoUpdate {
    #[validate(length(min = 1))]
    pub title: Option<String>,

    pub description: Option<String>,

    pub state: Option<TodoState>,
}

/// Envelope for the todo listing endpoint.
#[derive(Debug, Serialize, Deserialize)]
pub struct TodoList {
    pub todos: Vec<TodoPublic>,
}

/// Query parameters for filtering the todo listing.
///
/// All three content filters are substring matches; `state` matches against
/// the textual form of the enum, so `state=d` finds draft, doing and done.
#[derive(Debug, Deserialize)]
pub struct FilterTodo {
    pub title: Option<String>,
    pub description: Option<String>,
    pub state: Option<String>,
    #[serde(default)]
    pub offset: i64,
    #[serde(default = "default_limit")]
    pub limit: i64,
}
