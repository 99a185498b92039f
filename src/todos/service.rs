use super::types::{OrderBy, StateFilter, TodoError, TodoItem, TodoPatch, TodoState};
use crate::storage::{Cache, EntryId, EntryStore, Partition, Record};

use chrono::Utc;
use std::sync::Arc;

/// Cache segment holding to-do items.
pub const TODO_SEGMENT: &str = "TodoList";

/// To-do operations, always scoped to one owner's partition.
///
/// The owner id is passed in explicitly by the caller; an item outside the
/// owner's partition is indistinguishable from a missing one.
pub struct TodoService {
    store: EntryStore<TodoItem>,
}

impl TodoService {
    pub fn new(cache: Arc<dyn Cache>) -> Arc<Self> {
        Arc::new(Self {
            store: EntryStore::new(cache, TODO_SEGMENT),
        })
    }

    pub async fn list(
        &self,
        owner: &EntryId,
        filter: StateFilter,
        order_by: OrderBy,
    ) -> Result<Vec<Record<TodoItem>>, TodoError> {
        let mut items: Vec<Record<TodoItem>> = self
            .store
            .get_all_entries(&Partition::owner(owner))
            .await?
            .into_iter()
            .filter(|item| filter.matches(item.value.state))
            .collect();

        // Stable: ties keep index (insertion) order.
        match order_by {
            OrderBy::DateAdded => items.sort_by(|a, b| a.value.date_added.cmp(&b.value.date_added)),
            OrderBy::Description => {
                items.sort_by(|a, b| a.value.description.cmp(&b.value.description))
            }
        }

        Ok(items)
    }

    pub async fn create(
        &self,
        owner: &EntryId,
        description: String,
    ) -> Result<Record<TodoItem>, TodoError> {
        let item = TodoItem {
            owner_id: owner.clone(),
            state: TodoState::Incomplete,
            description,
            date_added: Utc::now(),
        };

        let record = self.store.insert_entry(item, &Partition::owner(owner)).await?;
        tracing::info!("Created to-do {} for {}", record.id, owner);
        Ok(record)
    }

    /// Applies the supplied fields to an incomplete item.
    pub async fn patch(
        &self,
        id: &EntryId,
        owner: &EntryId,
        patch: TodoPatch,
    ) -> Result<Record<TodoItem>, TodoError> {
        let partition = Partition::owner(owner);

        let mut record = self
            .store
            .get_entry(id, &partition)
            .await?
            .ok_or(TodoError::NotFound)?;

        if record.value.state == TodoState::Complete {
            tracing::debug!("Rejected patch of completed to-do {}", id);
            return Err(TodoError::InvalidTransition);
        }

        if let Some(state) = patch.state {
            record.value.state = state;
        }
        if let Some(description) = patch.description {
            record.value.description = description;
        }

        // The item can vanish between the read and the write.
        self.store
            .update_entry(record, &partition)
            .await?
            .ok_or(TodoError::NotFound)
    }

    pub async fn delete(&self, id: &EntryId, owner: &EntryId) -> Result<(), TodoError> {
        if self.store.delete_entry(id, &Partition::owner(owner)).await? {
            tracing::info!("Deleted to-do {} for {}", id, owner);
            Ok(())
        } else {
            Err(TodoError::NotFound)
        }
    }
}
