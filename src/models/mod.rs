pub mod todo;
pub mod user;

pub use todo::{FilterTodo, Todo, TodoInput, TodoList, TodoPublic, TodoState, TodoUpdate};
pub use user::{FilterPage, User, UserInput, UserList, UserPublic};
