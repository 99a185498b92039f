//! Generic record store with a per-partition secondary index.
//!
//! Each store instance owns a cache segment. Records live under
//! `"{segment}:entry:{id}"`; each partition's index is a JSON array of ids
//! under [`Partition::index_key`].
//!
//! Ordering rules that keep the index consistent:
//! - insert writes the record, then appends its id to the index;
//! - delete removes the id from the index, then drops the record.
//!
//! An index id whose record has expired is skipped on read.

use super::cache::Cache;
use super::partitioner::{Partition, PartitionLocks};
use super::types::{EntryId, Record, StoreResult};

use serde::Serialize;
use serde::de::DeserializeOwned;
use std::marker::PhantomData;
use std::sync::Arc;

pub struct EntryStore<T> {
    cache: Arc<dyn Cache>,
    segment: String,
    locks: PartitionLocks,
    _value: PhantomData<fn() -> T>,
}

impl<T> EntryStore<T>
where
    T: Clone + Serialize + DeserializeOwned + Send + Sync,
{
    pub fn new(cache: Arc<dyn Cache>, segment: &str) -> Self {
        Self {
            cache,
            segment: segment.to_string(),
            locks: PartitionLocks::new(),
            _value: PhantomData,
        }
    }

    pub fn segment(&self) -> &str {
        &self.segment
    }

    fn entry_key(&self, id: &EntryId) -> String {
        format!("{}:entry:{}", self.segment, id.0)
    }

    async fn read_index(&self, partition: &Partition) -> StoreResult<Vec<EntryId>> {
        match self.cache.get(&partition.index_key(&self.segment)).await? {
            Some(value) => Ok(serde_json::from_value(value)?),
            None => Ok(Vec::new()),
        }
    }

    async fn write_index(&self, partition: &Partition, index: &[EntryId]) -> StoreResult<()> {
        let value = serde_json::to_value(index)?;
        self.cache
            .set(&partition.index_key(&self.segment), value)
            .await
    }

    async fn read_record(&self, id: &EntryId) -> StoreResult<Option<Record<T>>> {
        match self.cache.get(&self.entry_key(id)).await? {
            Some(value) => Ok(Some(serde_json::from_value(value)?)),
            None => Ok(None),
        }
    }

    async fn write_record(&self, record: &Record<T>) -> StoreResult<()> {
        let value = serde_json::to_value(record)?;
        self.cache.set(&self.entry_key(&record.id), value).await
    }

    /// Returns every live record of `partition`, in index order.
    pub async fn get_all_entries(&self, partition: &Partition) -> StoreResult<Vec<Record<T>>> {
        let index = self.read_index(partition).await?;
        let mut entries = Vec::with_capacity(index.len());

        for id in index.iter() {
            match self.read_record(id).await? {
                Some(record) => entries.push(record),
                None => {
                    tracing::debug!("{}: index id {} has no live record, skipping", self.segment, id);
                }
            }
        }

        Ok(entries)
    }

    /// Looks `id` up in `partition`'s index and returns its record.
    pub async fn get_entry(
        &self,
        id: &EntryId,
        partition: &Partition,
    ) -> StoreResult<Option<Record<T>>> {
        let index = self.read_index(partition).await?;

        if !index.contains(id) {
            return Ok(None);
        }

        self.read_record(id).await
    }

    /// Stores `value` under a fresh id and appends the id to `partition`'s index.
    pub async fn insert_entry(&self, value: T, partition: &Partition) -> StoreResult<Record<T>> {
        let record = Record {
            id: EntryId::new(),
            value,
        };

        let _guard = self.locks.lock(partition).await;

        self.write_record(&record).await?;

        let mut index = self.read_index(partition).await?;
        index.push(record.id.clone());
        self.write_index(partition, &index).await?;

        tracing::debug!("{}: inserted {}", self.segment, record.id);
        Ok(record)
    }

    /// Overwrites an existing record of `partition`.
    ///
    /// Returns `None` without writing anything when `record.id` is not
    /// indexed under `partition`.
    pub async fn update_entry(
        &self,
        record: Record<T>,
        partition: &Partition,
    ) -> StoreResult<Option<Record<T>>> {
        let _guard = self.locks.lock(partition).await;

        if self.get_entry(&record.id, partition).await?.is_none() {
            tracing::debug!("{}: update of unknown id {} ignored", self.segment, record.id);
            return Ok(None);
        }

        self.write_record(&record).await?;
        tracing::debug!("{}: updated {}", self.segment, record.id);
        Ok(Some(record))
    }

    /// Removes `id` from `partition`. Returns `false` if no live record was there.
    ///
    /// An indexed id whose record already expired is unlinked from the index
    /// but still reported as absent.
    pub async fn delete_entry(&self, id: &EntryId, partition: &Partition) -> StoreResult<bool> {
        let _guard = self.locks.lock(partition).await;

        let mut index = self.read_index(partition).await?;
        let before = index.len();
        index.retain(|indexed| indexed != id);

        if index.len() == before {
            return Ok(false);
        }

        let existed = self.read_record(id).await?.is_some();

        self.write_index(partition, &index).await?;
        self.cache.remove(&self.entry_key(id)).await?;

        tracing::debug!("{}: deleted {} (live: {})", self.segment, id, existed);
        Ok(existed)
    }
}
