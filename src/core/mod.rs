//! Core module containing the inventory domain: records, ids, store contract

pub mod category;
pub mod cloth_id;
pub mod error;
pub mod format;
pub mod intake;
pub mod listing;
pub mod receipt;
pub mod record;
pub mod store;

pub use category::ClothCategory;
pub use cloth_id::{ClothId, ClothIdGenerator, FixedIdSource, IdSource, SystemIdSource};
pub use error::{ErrorResponse, InventoryError, Result};
pub use intake::{IntakeReceipt, IntakeService};
pub use listing::{InventoryListing, InventoryStats, filter_records};
pub use receipt::ReceiptRenderer;
pub use record::{IntakeForm, InventoryRecord, receipt_path};
pub use store::{RecordStore, StorageSlot};
