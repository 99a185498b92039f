use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::storage::StoreError;

/// A registered user. Stored as `Record<Account>`, so the id lives on the record.
///
/// `password_hash` is a bcrypt hash; plaintext passwords are never stored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Account {
    pub name: String,
    pub password_hash: String,
}

#[derive(Error, Debug)]
pub enum AccountError {
    #[error("an account with that name already exists")]
    AlreadyExists,

    /// Same variant for an unknown name and a wrong password.
    #[error("invalid username or password")]
    InvalidCredentials,

    #[error("password hashing failed: {0}")]
    Hashing(String),

    #[error(transparent)]
    Store(#[from] StoreError),
}
