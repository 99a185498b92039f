//! Accounts & Sessions Module
//!
//! User registration, credential checks and cookie-based sessions.
//!
//! ## Core Mechanisms
//! - **Storage**: Accounts live in one unpartitioned `EntryStore` (segment `Users`).
//! - **Passwords**: Hashed with bcrypt at a configurable cost; never stored in plaintext.
//! - **Sessions**: An HMAC-signed `sid` cookie carries the account id. The
//!   `CurrentAccount` extractor verifies it and loads the account per request.

pub mod handlers;
pub mod protocol;
pub mod service;
pub mod session;
pub mod types;

pub use service::AccountService;
pub use session::{CurrentAccount, SessionSigner};
pub use types::{Account, AccountError};

#[cfg(test)]
mod tests;
