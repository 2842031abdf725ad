//! Record store over a single JSON-array slot
//!
//! The slot holds one JSON array of records. Every read parses the whole
//! array; every append rewrites it.
//!
//! # Fail-open reads
//!
//! - absent slot: empty inventory
//! - slot that is not a JSON array: empty inventory, logged as corruption
//! - array element that is not a readable record: skipped, logged
//! - slot read failure: empty inventory, logged as an error
//!
//! Appends work on the raw JSON elements, so elements this version cannot
//! decode are carried forward untouched instead of being dropped. A slot
//! that is not a JSON array is never overwritten: the append fails and the
//! stored value is left as it was.

use crate::core::error::{InventoryError, Result};
use crate::core::record::InventoryRecord;
use crate::core::store::{RecordStore, StorageSlot};
use crate::storage::InMemorySlot;
use async_trait::async_trait;
use serde_json::Value;
use std::sync::Arc;
use tokio::sync::Mutex;

/// `RecordStore` implementation backed by any [`StorageSlot`]
#[derive(Clone)]
pub struct JsonRecordStore {
    slot: Arc<dyn StorageSlot>,
    // Serializes read-modify-write appends within this process
    append_lock: Arc<Mutex<()>>,
}

impl JsonRecordStore {
    pub fn new(slot: impl StorageSlot + 'static) -> Self {
        Self::from_arc(Arc::new(slot))
    }

    pub fn from_arc(slot: Arc<dyn StorageSlot>) -> Self {
        Self {
            slot,
            append_lock: Arc::new(Mutex::new(())),
        }
    }

    /// Store over a fresh in-memory slot
    pub fn in_memory() -> Self {
        Self::new(InMemorySlot::new())
    }

    /// Parse the slot's raw elements; `None` when the slot is corrupted
    fn parse_entries(raw: &str) -> Option<Vec<Value>> {
        match serde_json::from_str::<Vec<Value>>(raw) {
            Ok(entries) => Some(entries),
            Err(e) => {
                tracing::warn!(error = %e, "inventory slot is corrupted, treating it as empty");
                None
            }
        }
    }

    async fn read_entries(&self) -> Result<Vec<Value>> {
        let raw = self.slot.read().await?;
        Ok(raw
            .as_deref()
            .and_then(Self::parse_entries)
            .unwrap_or_default())
    }

    /// Raw elements for an append; a corrupted slot is an error here
    async fn entries_for_append(&self) -> Result<Vec<Value>> {
        let Some(raw) = self.slot.read().await? else {
            return Ok(Vec::new());
        };
        serde_json::from_str::<Vec<Value>>(&raw).map_err(|e| {
            tracing::error!(error = %e, "inventory slot is corrupted, refusing to append");
            InventoryError::Storage(format!("inventory slot is corrupted: {}", e))
        })
    }
}

#[async_trait]
impl RecordStore for JsonRecordStore {
    async fn load_all(&self) -> Vec<InventoryRecord> {
        let entries = match self.read_entries().await {
            Ok(entries) => entries,
            Err(e) => {
                tracing::error!(error = %e, "inventory slot could not be read, treating it as empty");
                return Vec::new();
            }
        };

        entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(record) => Some(record),
                Err(e) => {
                    tracing::warn!(index, error = %e, "skipping unreadable inventory record");
                    None
                }
            })
            .collect()
    }

    async fn append_one(&self, record: InventoryRecord) -> Result<()> {
        let _guard = self.append_lock.lock().await;

        let mut entries = self.entries_for_append().await?;
        entries.push(serde_json::to_value(&record)?);
        self.slot.write(serde_json::to_string(&entries)?).await?;

        tracing::debug!(cloth_id = %record.cloth_id, total = entries.len(), "record appended");
        Ok(())
    }

    async fn find_by_id(&self, cloth_id: &str) -> Option<InventoryRecord> {
        let found = self
            .load_all()
            .await
            .into_iter()
            .find(|record| record.cloth_id == cloth_id);
        if found.is_none() {
            tracing::debug!(cloth_id, "no inventory record for cloth id");
        }
        found
    }

    async fn clear(&self) -> Result<()> {
        let _guard = self.append_lock.lock().await;
        self.slot.remove().await?;
        tracing::info!("inventory slot cleared");
        Ok(())
    }
}
