use super::types::{Account, AccountError};
use crate::storage::{Cache, EntryId, EntryStore, Partition, Record};

use std::sync::Arc;

/// Cache segment holding accounts.
pub const ACCOUNT_SEGMENT: &str = "Users";

/// Default bcrypt work factor.
pub const DEFAULT_BCRYPT_COST: u32 = 10;

/// Registration and credential checks over an unpartitioned entry store.
///
/// Every lookup scans all accounts, which is fine for the small account
/// counts this service targets but is O(n) per request.
pub struct AccountService {
    store: EntryStore<Account>,
    bcrypt_cost: u32,
}

impl AccountService {
    pub fn new(cache: Arc<dyn Cache>, bcrypt_cost: u32) -> Arc<Self> {
        Arc::new(Self {
            store: EntryStore::new(cache, ACCOUNT_SEGMENT),
            bcrypt_cost,
        })
    }

    async fn find_by_name(&self, username: &str) -> Result<Option<Record<Account>>, AccountError> {
        let accounts = self.store.get_all_entries(&Partition::Global).await?;
        Ok(accounts
            .into_iter()
            .find(|account| account.value.name == username))
    }

    /// Creates a new account. Names are unique and compared case-sensitively.
    ///
    /// The name check and the insert are two separate store calls, so two
    /// concurrent registrations of one name can both succeed.
    pub async fn register(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Record<Account>, AccountError> {
        if self.find_by_name(username).await?.is_some() {
            tracing::debug!("Registration rejected, name taken: {}", username);
            return Err(AccountError::AlreadyExists);
        }

        let password_hash = hash_password(password, self.bcrypt_cost).await?;
        let account = self
            .store
            .insert_entry(
                Account {
                    name: username.to_string(),
                    password_hash,
                },
                &Partition::Global,
            )
            .await?;

        tracing::info!("Registered account {} ({})", account.value.name, account.id);
        Ok(account)
    }

    pub async fn authenticate(
        &self,
        username: &str,
        password: &str,
    ) -> Result<Record<Account>, AccountError> {
        let Some(account) = self.find_by_name(username).await? else {
            return Err(AccountError::InvalidCredentials);
        };

        if verify_password(password, &account.value.password_hash).await? {
            Ok(account)
        } else {
            Err(AccountError::InvalidCredentials)
        }
    }

    /// Resolves a session's account id by scanning every account.
    pub async fn find_by_id(&self, id: &EntryId) -> Result<Option<Record<Account>>, AccountError> {
        let accounts = self.store.get_all_entries(&Partition::Global).await?;
        Ok(accounts.into_iter().find(|account| &account.id == id))
    }

    pub async fn account_count(&self) -> Result<usize, AccountError> {
        Ok(self.store.get_all_entries(&Partition::Global).await?.len())
    }
}

// bcrypt runs on the blocking pool.
async fn hash_password(password: &str, cost: u32) -> Result<String, AccountError> {
    let password = password.to_string();
    tokio::task::spawn_blocking(move || bcrypt::hash(password, cost))
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?
        .map_err(|e| AccountError::Hashing(e.to_string()))
}

async fn verify_password(password: &str, password_hash: &str) -> Result<bool, AccountError> {
    let password = password.to_string();
    let password_hash = password_hash.to_string();
    tokio::task::spawn_blocking(move || bcrypt::verify(password, &password_hash))
        .await
        .map_err(|e| AccountError::Hashing(e.to_string()))?
        .map_err(|e| AccountError::Hashing(e.to_string()))
}
