//! Account API Protocol
//!
//! Endpoints and request bodies of the login/registration surface, plus the
//! boundary validation applied before the service is called.

use serde::Deserialize;

use crate::error::AppError;

pub const ENDPOINT_LOGIN: &str = "/login";
pub const ENDPOINT_REGISTER: &str = "/register";
pub const ENDPOINT_LOGOUT: &str = "/logout";

pub const CREDENTIAL_MIN_LEN: usize = 3;
pub const CREDENTIAL_MAX_LEN: usize = 30;

/// Body of `POST /login` and `PUT /register`.
#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CredentialsRequest {
    pub username: String,
    pub password: String,
}

impl CredentialsRequest {
    /// Both fields must be ASCII alphanumeric, 3 to 30 characters.
    pub fn validate(&self) -> Result<(), AppError> {
        validate_credential("username", &self.username)?;
        validate_credential("password", &self.password)
    }
}

fn validate_credential(field: &str, value: &str) -> Result<(), AppError> {
    let len = value.chars().count();
    if !(CREDENTIAL_MIN_LEN..=CREDENTIAL_MAX_LEN).contains(&len) {
        return Err(AppError::Validation(format!(
            "{} must be {} to {} characters long",
            field, CREDENTIAL_MIN_LEN, CREDENTIAL_MAX_LEN
        )));
    }
    if !value.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(AppError::Validation(format!(
            "{} must only contain letters and digits",
            field
        )));
    }
    Ok(())
}
