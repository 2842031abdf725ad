//! In-memory implementation of StorageSlot for testing and development

use crate::core::error::{InventoryError, Result};
use crate::core::store::StorageSlot;
use async_trait::async_trait;
use std::sync::{Arc, RwLock};

/// In-memory storage slot
///
/// Contents are lost when the process exits. Uses RwLock for thread-safe access.
#[derive(Clone, Default)]
pub struct InMemorySlot {
    value: Arc<RwLock<Option<String>>>,
}

impl InMemorySlot {
    /// Create an empty slot
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a slot pre-seeded with a raw value (which need not be valid JSON)
    pub fn with_value(value: impl Into<String>) -> Self {
        Self {
            value: Arc::new(RwLock::new(Some(value.into()))),
        }
    }
}

#[async_trait]
impl StorageSlot for InMemorySlot {
    async fn read(&self) -> Result<Option<String>> {
        let value = self
            .value
            .read()
            .map_err(|e| InventoryError::Storage(format!("Failed to acquire read lock: {}", e)))?;

        Ok(value.clone())
    }

    async fn write(&self, new_value: String) -> Result<()> {
        let mut value = self
            .value
            .write()
            .map_err(|e| InventoryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *value = Some(new_value);

        Ok(())
    }

    async fn remove(&self) -> Result<()> {
        let mut value = self
            .value
            .write()
            .map_err(|e| InventoryError::Storage(format!("Failed to acquire write lock: {}", e)))?;

        *value = None;

        Ok(())
    }
}
