use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Unique identifier of a stored record.
///
/// Wrapper around a UUID v4 string. Assigned once by the store on insertion
/// and never reassigned.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(transparent)]
pub struct EntryId(pub String);

impl EntryId {
    /// Generates a new random UUID v4-based EntryId.
    pub fn new() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for EntryId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EntryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A caller-supplied value together with the id the store assigned to it.
///
/// Serialized flat, so a record of `{ "name": "alice" }` reads as
/// `{ "id": "...", "name": "alice" }`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Record<T> {
    pub id: EntryId,
    #[serde(flatten)]
    pub value: T,
}

/// Failures of the backing cache. Both variants are fatal for the request.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("store backend unavailable: {0}")]
    BackendUnavailable(String),

    #[error("stored value could not be (de)serialized: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type StoreResult<T> = Result<T, StoreError>;
