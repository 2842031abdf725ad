//! Garment intake: validate a form, stamp it, append it

use crate::core::category::ClothCategory;
use crate::core::cloth_id::ClothIdGenerator;
use crate::core::error::Result;
use crate::core::format::{format_long_date, format_timestamp};
use crate::core::record::{IntakeForm, InventoryRecord};
use crate::core::store::RecordStore;
use chrono::FixedOffset;
use serde::Serialize;
use std::sync::Arc;
use validator::Validate;

/// Outcome of a successful intake
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct IntakeReceipt {
    pub record: InventoryRecord,
    /// Where the printable receipt for the new record lives
    pub receipt_url: String,
}

/// Turns intake forms into stored records
#[derive(Clone)]
pub struct IntakeService {
    store: Arc<dyn RecordStore>,
    ids: ClothIdGenerator,
    offset: FixedOffset,
}

impl IntakeService {
    /// `offset` is the local time zone used for the display date
    pub fn new(store: Arc<dyn RecordStore>, ids: ClothIdGenerator, offset: FixedOffset) -> Self {
        Self { store, ids, offset }
    }

    /// Submit one form
    ///
    /// Nothing is written unless the form validates. Failures are returned
    /// to the caller as-is; there is no retry.
    pub async fn submit(&self, form: IntakeForm) -> Result<IntakeReceipt> {
        form.validate()?;
        let category: ClothCategory = form.cloth_category.parse()?;

        let (cloth_id, at) = self.ids.generate_at(category);
        let record = InventoryRecord {
            cloth_id: cloth_id.to_string(),
            owner_name: form.owner_name,
            owner_mobile: form.owner_mobile,
            cloth_category: category,
            cloth_age: form.cloth_age,
            purchase_price: form.purchase_price,
            rental_price: form.rental_price,
            resale_price: form.resale_price,
            date: format_long_date(at, self.offset),
            created_at: format_timestamp(at),
        };

        if let Err(e) = self.store.append_one(record.clone()).await {
            tracing::error!(cloth_id = %record.cloth_id, error = %e, "failed to save intake");
            return Err(e);
        }

        tracing::info!(
            cloth_id = %record.cloth_id,
            category = %record.cloth_category,
            "item added and receipt generated"
        );

        Ok(IntakeReceipt {
            receipt_url: record.receipt_path(),
            record,
        })
    }
}
