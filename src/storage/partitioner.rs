use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::types::EntryId;

const GLOBAL_INDEX: &str = "index";

/// The index a store operation works against.
///
/// Unpartitioned stores (accounts) use `Global`; the to-do store keeps one
/// index per owning account so a user's listing never touches another
/// user's ids.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Partition {
    Global,
    Owner(String),
}

impl Partition {
    pub fn owner(owner_id: &EntryId) -> Self {
        Partition::Owner(owner_id.0.clone())
    }

    /// Cache key of this partition's index inside `segment`.
    pub fn index_key(&self, segment: &str) -> String {
        match self {
            Partition::Global => format!("{}:{}", segment, GLOBAL_INDEX),
            Partition::Owner(owner) => format!("{}:{}:{}", segment, GLOBAL_INDEX, owner),
        }
    }
}

/// Per-partition write locks.
///
/// Index updates are read-modify-write sequences on a single cache value;
/// holding the partition's lock across the sequence keeps concurrent inserts
/// from losing appends. Locks are created on first use and never removed.
#[derive(Default)]
pub struct PartitionLocks {
    locks: DashMap<Partition, Arc<Mutex<()>>>,
}

impl PartitionLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn lock(&self, partition: &Partition) -> OwnedMutexGuard<()> {
        let lock = self
            .locks
            .entry(partition.clone())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        lock.lock_owned().await
    }

    pub fn len(&self) -> usize {
        self.locks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.locks.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_keys_are_segment_scoped() {
        assert_eq!(Partition::Global.index_key("Users"), "Users:index");
        assert_eq!(
            Partition::Owner("abc".to_string()).index_key("TodoList"),
            "TodoList:index:abc"
        );
        assert_ne!(
            Partition::Global.index_key("Users"),
            Partition::Global.index_key("TodoList")
        );
    }

    #[tokio::test]
    async fn test_locks_are_reused_per_partition() {
        let locks = PartitionLocks::new();
        let alice = Partition::Owner("alice".to_string());

        drop(locks.lock(&alice).await);
        drop(locks.lock(&alice).await);
        drop(locks.lock(&Partition::Global).await);

        assert_eq!(locks.len(), 2);
    }
}
