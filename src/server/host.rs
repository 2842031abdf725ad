//! Server host holding the state every handler shares
//!
//! The host is built once by [`ServerBuilder`](super::ServerBuilder) and
//! handed to the router behind an `Arc`.

use crate::config::AppConfig;
use crate::core::{ClothIdGenerator, IntakeService, ReceiptRenderer, RecordStore, Result};
use std::sync::Arc;

/// Shared application state
pub struct ServerHost {
    /// Effective configuration
    pub config: Arc<AppConfig>,

    /// Inventory record store
    pub store: Arc<dyn RecordStore>,

    /// Intake pipeline writing into `store`
    pub intake: IntakeService,

    /// Receipt, not-found and dashboard pages
    pub receipts: Arc<ReceiptRenderer>,
}

impl ServerHost {
    /// Wire the services together around one store
    pub fn new(
        config: AppConfig,
        store: Arc<dyn RecordStore>,
        ids: ClothIdGenerator,
    ) -> Result<Self> {
        let offset = config.locale.offset()?;
        let receipts = ReceiptRenderer::new(config.business.clone(), offset)?;
        let intake = IntakeService::new(store.clone(), ids, offset);

        Ok(Self {
            config: Arc::new(config),
            store,
            intake,
            receipts: Arc::new(receipts),
        })
    }
}

/// State type extracted by handlers
pub type AppState = Arc<ServerHost>;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::JsonRecordStore;

    #[test]
    fn test_host_shares_store_with_intake() {
        let store: Arc<dyn RecordStore> = Arc::new(JsonRecordStore::in_memory());
        let host = ServerHost::new(AppConfig::default(), store.clone(), ClothIdGenerator::default())
            .expect("should build host");
        assert!(Arc::ptr_eq(&host.store, &store));
        assert_eq!(host.config.business.name, "Luxeloop");
    }

    #[test]
    fn test_invalid_offset_fails_host() {
        let mut config = AppConfig::default();
        config.locale.utc_offset_minutes = 24 * 60;
        let store: Arc<dyn RecordStore> = Arc::new(JsonRecordStore::in_memory());
        assert!(ServerHost::new(config, store, ClothIdGenerator::default()).is_err());
    }
}
