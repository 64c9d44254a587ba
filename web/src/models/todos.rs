//! Todo resource models.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// A todo item as returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Todo {
    /// Identifier assigned on creation.
    pub id: Uuid,
    /// What needs doing.
    pub title: String,
    /// Whether it is done.
    #[serde(default)]
    pub completed: bool,
}

/// Request body for creating a todo.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct NewTodo {
    /// What needs doing.
    pub title: String,
    /// Whether it is already done.
    #[serde(default)]
    pub completed: bool,
}

impl NewTodo {
    /// Builds the stored representation under `id`.
    pub fn into_todo(self, id: Uuid) -> Todo {
        Todo {
            id,
            title: self.title,
            completed: self.completed,
        }
    }
}
