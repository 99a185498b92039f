//! Multi-Tenant To-Do Service Library
//!
//! This library crate defines the modules behind the `todo-service` binary
//! (`main.rs`).
//!
//! ## Architecture Modules
//! - **`storage`**: The expiring key-value cache and the indexed, optionally
//!   owner-partitioned `EntryStore` built on top of it.
//! - **`accounts`**: Registration, bcrypt password checks and HMAC-signed
//!   session cookies.
//! - **`todos`**: Per-user to-do items with filtering, ordering and a
//!   one-way `INCOMPLETE -> COMPLETE` state machine.
//! - **`app`**: The Axum router wiring both services together.
//! - **`config`**: Environment-driven startup configuration.
//! - **`error`**: The HTTP-facing error type and its status mapping.

pub mod accounts;
pub mod app;
pub mod config;
pub mod error;
pub mod storage;
pub mod todos;
