//! Todo model.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single todo item as it appears on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Todo {
    pub id: String,
    pub text: String,
    pub completed: bool,
    pub created_at: DateTime<Utc>,
}

/// Data required to create a new todo. `text` is already trimmed and non-empty
/// by the time it reaches a store.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub text: String,
}

/// Partial update for a todo. `None` fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct TodoPatch {
    pub text: Option<String>,
    pub completed: Option<bool>,
}
