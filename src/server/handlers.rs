//! HTTP handlers for intake, listing and receipts

use axum::{
    Json,
    extract::{Path, Query, State},
    http::{StatusCode, header},
    response::{Html, IntoResponse, Response},
};
use serde::Deserialize;
use serde_json::{Value, json};

use crate::core::{
    IntakeForm, IntakeReceipt, InventoryError, InventoryListing, InventoryRecord, InventoryStats,
    Result,
};
use crate::server::extractors::JsonBody;
use crate::server::host::AppState;

/// Query string of the inventory list
#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    /// Case-insensitive search term (`?search=` or `?q=`)
    #[serde(alias = "q")]
    pub search: Option<String>,
}

/// Health check
///
/// GET /health
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "luxeloop"
    }))
}

/// Landing page with the headline statistics
///
/// GET /
pub async fn dashboard(State(state): State<AppState>) -> Result<Html<String>> {
    let records = state.store.load_all().await;
    let stats = InventoryStats::compute(&records);
    Ok(Html(state.receipts.render_dashboard(&stats)?))
}

/// Register a garment
///
/// POST /api/inventory
///
/// Answers 201 with the stored record and a `Location` header pointing at
/// the printable receipt.
pub async fn create_item(
    State(state): State<AppState>,
    JsonBody(form): JsonBody<IntakeForm>,
) -> Result<Response> {
    let receipt: IntakeReceipt = state.intake.submit(form).await?;
    Ok((
        StatusCode::CREATED,
        [(header::LOCATION, receipt.receipt_url.clone())],
        Json(receipt),
    )
        .into_response())
}

/// List the inventory, optionally filtered
///
/// GET /api/inventory?search=<term>
///
/// The store is read once per request; the response is a snapshot.
pub async fn list_items(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Json<InventoryListing> {
    let records = state.store.load_all().await;
    Json(InventoryListing::build(&records, params.search.as_deref()))
}

/// Fetch one record
///
/// GET /api/inventory/{cloth_id}
pub async fn get_item(
    State(state): State<AppState>,
    Path(cloth_id): Path<String>,
) -> Result<Json<InventoryRecord>> {
    state
        .store
        .find_by_id(&cloth_id)
        .await
        .map(Json)
        .ok_or(InventoryError::NotFound { cloth_id })
}

/// Printable receipt
///
/// GET /receipt/{cloth_id}
///
/// An unknown id renders the "Receipt Not Found" page.
pub async fn receipt_page(
    State(state): State<AppState>,
    Path(cloth_id): Path<String>,
) -> Result<Response> {
    match state.store.find_by_id(&cloth_id).await {
        Some(record) => Ok(Html(state.receipts.render_receipt(&record)?).into_response()),
        None => Ok((
            StatusCode::NOT_FOUND,
            Html(state.receipts.render_not_found()?),
        )
            .into_response()),
    }
}

/// QR code of a stored cloth id
///
/// GET /receipt/{cloth_id}/qr.svg
pub async fn receipt_qr(
    State(state): State<AppState>,
    Path(cloth_id): Path<String>,
) -> Result<Response> {
    let record = state
        .store
        .find_by_id(&cloth_id)
        .await
        .ok_or(InventoryError::NotFound { cloth_id })?;
    let svg = state.receipts.qr_svg(&record.cloth_id)?;
    Ok(([(header::CONTENT_TYPE, "image/svg+xml")], svg).into_response())
}
