//! To-Do API Protocol
//!
//! Endpoints, request/response bodies and boundary validation for the
//! to-do routes. Handlers convert these into service calls; the service
//! never sees them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::{Uuid, Version};

use super::types::{OrderBy, StateFilter, TodoItem, TodoPatch, TodoState};
use crate::error::AppError;
use crate::storage::{EntryId, Record};

pub const ENDPOINT_TODOS: &str = "/todos";
pub const ENDPOINT_TODO: &str = "/todo/:id";

/// Query of `GET /todos`. Both parameters are optional.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListQuery {
    #[serde(default)]
    pub filter: StateFilter,
    #[serde(default)]
    pub order_by: OrderBy,
}

/// Body of `PUT /todos`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CreateTodoRequest {
    pub description: String,
}

impl CreateTodoRequest {
    pub fn validate(&self) -> Result<(), AppError> {
        validate_description(&self.description)
    }
}

/// Body of `PATCH /todo/{id}`.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PatchTodoRequest {
    pub state: Option<TodoState>,
    pub description: Option<String>,
}

impl PatchTodoRequest {
    /// At least one field must be present; a description must not be empty.
    pub fn validate(self) -> Result<TodoPatch, AppError> {
        if self.state.is_none() && self.description.is_none() {
            return Err(AppError::Validation(
                "one of state or description is required".to_string(),
            ));
        }
        if let Some(description) = &self.description {
            validate_description(description)?;
        }

        Ok(TodoPatch {
            state: self.state,
            description: self.description,
        })
    }
}

/// A to-do as returned to its owner.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoResponse {
    pub id: EntryId,
    pub state: TodoState,
    pub description: String,
    pub date_added: DateTime<Utc>,
}

impl From<Record<TodoItem>> for TodoResponse {
    fn from(record: Record<TodoItem>) -> Self {
        Self {
            id: record.id,
            state: record.value.state,
            description: record.value.description,
            date_added: record.value.date_added,
        }
    }
}

fn validate_description(description: &str) -> Result<(), AppError> {
    if description.trim().is_empty() {
        return Err(AppError::Validation("description must not be empty".to_string()));
    }
    Ok(())
}

/// Parses a path id, accepting only UUID v4 values.
pub fn parse_todo_id(raw: &str) -> Result<EntryId, AppError> {
    let uuid = Uuid::parse_str(raw)
        .map_err(|_| AppError::Validation(format!("{} is not a valid id", raw)))?;

    if uuid.get_version() != Some(Version::Random) {
        return Err(AppError::Validation(format!("{} is not a v4 id", raw)));
    }

    Ok(EntryId(uuid.to_string()))
}
