use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::{EntryId, StoreError};

/// Lifecycle of a to-do item. `Complete` is terminal.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TodoState {
    Incomplete,
    Complete,
}

/// A to-do item as stored in its owner's partition.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TodoItem {
    pub owner_id: EntryId,
    pub state: TodoState,
    pub description: String,
    pub date_added: DateTime<Utc>,
}

/// Which items `list` returns.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StateFilter {
    #[default]
    All,
    Complete,
    Incomplete,
}

impl StateFilter {
    pub fn matches(self, state: TodoState) -> bool {
        match self {
            StateFilter::All => true,
            StateFilter::Complete => state == TodoState::Complete,
            StateFilter::Incomplete => state == TodoState::Incomplete,
        }
    }
}

/// Ascending sort key for `list`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderBy {
    #[default]
    DateAdded,
    Description,
}

/// Fields a patch may change. `None` leaves the field as it is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TodoPatch {
    pub state: Option<TodoState>,
    pub description: Option<String>,
}

#[derive(Error, Debug)]
pub enum TodoError {
    #[error("to-do not found")]
    NotFound,

    #[error("to-do is already complete")]
    InvalidTransition,

    #[error(transparent)]
    Store(#[from] StoreError),
}
