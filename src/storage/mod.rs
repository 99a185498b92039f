//! Storage Module
//!
//! Implements the indexed key-value store that backs both accounts and to-do items.
//!
//! ## Core Concepts
//! - **Cache**: The injected backend capability (`get` / `set` / `remove`) with a
//!   time-to-live restarted on every write. `MemoryCache` is the in-memory backend.
//! - **Partition**: Which index an operation uses. A store is either unpartitioned
//!   (`Partition::Global`) or keeps one index per owner.
//! - **EntryStore**: Typed CRUD over records, keeping each partition's index in
//!   step with the records it lists.
//!
//! Expiry is never an error: an expired record or index reads as absent.

pub mod cache;
pub mod entry_store;
pub mod memory;
pub mod partitioner;
pub mod types;

pub use cache::Cache;
pub use entry_store::EntryStore;
pub use memory::MemoryCache;
pub use partitioner::Partition;
pub use types::{EntryId, Record, StoreError, StoreResult};
