//! Cache capability the entry store is built on.
//!
//! A backend only has to offer `get`, `set` and `remove` over JSON values.
//! Every `set` (re)starts the value's time-to-live; a value whose TTL ran out
//! must read as absent rather than as an error.

use async_trait::async_trait;
use serde_json::Value;

use super::types::StoreResult;

#[async_trait]
pub trait Cache: Send + Sync {
    /// Returns the live value under `key`, or `None` if missing or expired.
    async fn get(&self, key: &str) -> StoreResult<Option<Value>>;

    /// Stores `value` under `key` and restarts its expiration clock.
    async fn set(&self, key: &str, value: Value) -> StoreResult<()>;

    /// Drops `key`. Removing a missing key is not an error.
    async fn remove(&self, key: &str) -> StoreResult<()>;
}
