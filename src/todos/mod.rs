//! To-Do Module
//!
//! Per-user to-do items on top of an owner-partitioned `EntryStore`
//! (segment `TodoList`, one index per account).
//!
//! ## State Machine
//! `INCOMPLETE --(patch)--> COMPLETE`. A completed item is terminal: every
//! further patch is rejected with `InvalidTransition`.
//!
//! ## Submodules
//! - **`service`**: list/filter/sort, create, patch, delete.
//! - **`protocol`**: request/response bodies and boundary validation.
//! - **`handlers`**: Axum handlers, all behind the session extractor.
//! - **`types`**: Domain types and errors.

pub mod handlers;
pub mod protocol;
pub mod service;
pub mod types;

pub use service::TodoService;
pub use types::{OrderBy, StateFilter, TodoError, TodoItem, TodoPatch, TodoState};
