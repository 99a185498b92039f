//! Cookie Sessions
//!
//! A session is the `sid` cookie holding `"{account_id}.{mac}"`, where `mac`
//! is the base64url HMAC-SHA256 of the account id under the server secret.
//! There is no session table: the cookie is trusted once its MAC checks out,
//! and the account it names is re-read on every request.

use super::service::AccountService;
use super::types::Account;
use crate::error::AppError;
use crate::storage::{EntryId, Record};

use axum::async_trait;
use axum::extract::FromRequestParts;
use axum::http::{HeaderMap, header, request::Parts};
use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::sync::Arc;

type HmacSha256 = Hmac<Sha256>;

pub const SESSION_COOKIE: &str = "sid";

pub struct SessionSigner {
    mac: HmacSha256,
    secure: bool,
}

impl SessionSigner {
    pub fn new(secret: &[u8], secure: bool) -> anyhow::Result<Arc<Self>> {
        let mac = HmacSha256::new_from_slice(secret)
            .map_err(|e| anyhow::anyhow!("Invalid session secret: {}", e))?;
        Ok(Arc::new(Self { mac, secure }))
    }

    fn sign(&self, account_id: &EntryId) -> String {
        let mut mac = self.mac.clone();
        mac.update(account_id.as_str().as_bytes());
        URL_SAFE_NO_PAD.encode(mac.finalize().into_bytes())
    }

    /// Builds the cookie value for `account_id`.
    pub fn issue(&self, account_id: &EntryId) -> String {
        format!("{}.{}", account_id, self.sign(account_id))
    }

    /// Returns the account id carried by `token` if its MAC is valid.
    pub fn verify(&self, token: &str) -> Option<EntryId> {
        let (account_id, signature) = token.rsplit_once('.')?;
        let signature = URL_SAFE_NO_PAD.decode(signature).ok()?;

        let mut mac = self.mac.clone();
        mac.update(account_id.as_bytes());
        mac.verify_slice(&signature).ok()?;

        Some(EntryId(account_id.to_string()))
    }

    /// `Set-Cookie` value that starts a session for `account_id`.
    pub fn session_cookie(&self, account_id: &EntryId) -> String {
        format!(
            "{}={}; {}",
            SESSION_COOKIE,
            self.issue(account_id),
            self.cookie_attributes()
        )
    }

    /// `Set-Cookie` value that clears the session cookie.
    pub fn clear_cookie(&self) -> String {
        format!("{}=; Max-Age=0; {}", SESSION_COOKIE, self.cookie_attributes())
    }

    fn cookie_attributes(&self) -> &'static str {
        if self.secure {
            "HttpOnly; Path=/; SameSite=Lax; Secure"
        } else {
            "HttpOnly; Path=/; SameSite=Lax"
        }
    }
}

/// Finds cookie `name` across all `Cookie` headers.
pub fn read_cookie<'a>(headers: &'a HeaderMap, name: &str) -> Option<&'a str> {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(key, _)| *key == name)
        .map(|(_, value)| value)
}

/// The account behind a valid session cookie.
///
/// Rejects with 401 when the cookie is missing, forged, or names an account
/// that no longer exists. Needs `Arc<AccountService>` and `Arc<SessionSigner>`
/// as request extensions.
#[derive(Debug, Clone)]
pub struct CurrentAccount(pub Record<Account>);

impl CurrentAccount {
    pub fn id(&self) -> &EntryId {
        &self.0.id
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for CurrentAccount
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let accounts = parts
            .extensions
            .get::<Arc<AccountService>>()
            .cloned()
            .ok_or_else(|| AppError::Internal("AccountService extension missing".to_string()))?;
        let signer = parts
            .extensions
            .get::<Arc<SessionSigner>>()
            .cloned()
            .ok_or_else(|| AppError::Internal("SessionSigner extension missing".to_string()))?;

        let token = read_cookie(&parts.headers, SESSION_COOKIE).ok_or(AppError::Unauthorized)?;

        let Some(account_id) = signer.verify(token) else {
            tracing::warn!("Rejected session cookie with invalid signature");
            return Err(AppError::Unauthorized);
        };

        match accounts.find_by_id(&account_id).await? {
            Some(account) => Ok(CurrentAccount(account)),
            None => {
                tracing::debug!("Session names unknown account {}", account_id);
                Err(AppError::Unauthorized)
            }
        }
    }
}
