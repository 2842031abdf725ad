//! Store traits for the inventory slot

use crate::core::error::Result;
use crate::core::record::InventoryRecord;
use async_trait::async_trait;

/// A single durable slot holding one raw string value
///
/// This is the whole persistence surface: the inventory lives as one JSON
/// array inside one slot, read and written wholesale.
#[async_trait]
pub trait StorageSlot: Send + Sync {
    /// Current raw value, or `None` if the slot was never written
    async fn read(&self) -> Result<Option<String>>;

    /// Replace the slot's value
    async fn write(&self, value: String) -> Result<()>;

    /// Remove the slot entirely
    async fn remove(&self) -> Result<()>;
}

/// Service trait for the inventory record store
///
/// Records are append-only. Reads are fail-open: a missing or unreadable
/// slot reads as an empty inventory rather than an error.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// All records in insertion order
    async fn load_all(&self) -> Vec<InventoryRecord>;

    /// Append one record at the end of the sequence
    async fn append_one(&self, record: InventoryRecord) -> Result<()>;

    /// First record whose `clothId` equals `cloth_id`
    async fn find_by_id(&self, cloth_id: &str) -> Option<InventoryRecord> {
        self.load_all()
            .await
            .into_iter()
            .find(|record| record.cloth_id == cloth_id)
    }

    /// Drop every record
    async fn clear(&self) -> Result<()>;
}
