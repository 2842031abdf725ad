//! # Luxeloop
//!
//! Garment intake and inventory for a boutique clothing resale and rental
//! business.
//!
//! ## Features
//!
//! - **Intake**: validate an owner/garment form, generate a cloth id and
//!   append the record
//! - **Cloth ids**: `LUX-<CODE>-<epochMillis>-<NNN>` with a fixed code per
//!   category
//! - **Single-slot store**: the whole inventory is one JSON array, kept in
//!   memory or in a file
//! - **Fail-open reads**: a corrupted slot reads as an empty inventory and is
//!   logged, never surfaced to the list or receipt views
//! - **Receipts**: printable HTML with a QR code of the cloth id
//! - **Listing**: case-insensitive search and aggregate statistics
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use luxeloop::prelude::*;
//!
//! let store = JsonRecordStore::new(FileSlot::new("data/inventory.json"));
//! ServerBuilder::new()
//!     .with_store(store)
//!     .serve()
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Domain ===
    pub use crate::core::{
        ClothCategory, ClothId, ClothIdGenerator, FixedIdSource, IdSource, IntakeForm,
        IntakeReceipt, IntakeService, InventoryError, InventoryListing, InventoryRecord,
        InventoryStats, ReceiptRenderer, SystemIdSource, filter_records, receipt_path,
    };

    // === Storage ===
    pub use crate::core::{RecordStore, StorageSlot};
    pub use crate::storage::{FileSlot, InMemorySlot, JsonRecordStore};

    // === Config ===
    pub use crate::config::{AppConfig, BusinessConfig, StorageBackend};

    // === Server ===
    pub use crate::server::{AppState, ServerBuilder, ServerHost};
}
