//! In-memory slot store, used when no database is configured.

use async_trait::async_trait;
use dashmap::DashMap;

use super::{SlotStore, StoreError};

/// Slots held in a concurrent map. Contents are lost on restart.
#[derive(Debug, Default)]
pub struct MemorySlotStore {
    slots: DashMap<String, String>,
}

impl MemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl SlotStore for MemorySlotStore {
    async fn get(&self, name: &str) -> Result<Option<String>, StoreError> {
        Ok(self.slots.get(name).map(|value| value.clone()))
    }

    async fn put(&self, name: &str, value: &str) -> Result<(), StoreError> {
        self.slots.insert(name.to_string(), value.to_string());
        Ok(())
    }
}
