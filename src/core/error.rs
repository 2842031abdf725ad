//! Typed error handling for the inventory service
//!
//! Every fallible operation in the crate returns [`InventoryError`]. Each
//! variant maps to an HTTP status code and a stable machine-readable code so
//! clients can branch on the failure instead of parsing messages.
//!
//! # Error Categories
//!
//! - `Validation`: intake form fields failed their constraints
//! - `UnknownCategory`: a category string outside the three known garments
//! - `InvalidBody`: the request body was not the expected JSON shape
//! - `NotFound`: no record carries the requested cloth id
//! - `Storage`: the backing slot could not be written
//! - `Render` / `QrCode`: receipt output could not be produced
//! - `Config`: the configuration file is missing or malformed
//!
//! # Example
//!
//! ```rust,ignore
//! match store.find_by_id(id).await? {
//!     Some(record) => Ok(Json(record)),
//!     None => Err(InventoryError::NotFound { cloth_id: id.to_string() }),
//! }
//! ```

use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde::Serialize;
use std::collections::BTreeMap;

/// Result alias used across the crate
pub type Result<T, E = InventoryError> = std::result::Result<T, E>;

/// The main error type for the inventory service
#[derive(Debug, thiserror::Error)]
pub enum InventoryError {
    /// One or more intake fields failed validation (field -> messages)
    #[error("Validation failed: {}", summarize(.0))]
    Validation(BTreeMap<String, Vec<String>>),

    /// A category outside the known set
    #[error("Unknown cloth category '{0}'")]
    UnknownCategory(String),

    /// Malformed request payload
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// Lookup miss on a cloth id
    #[error("No inventory record with cloth id '{cloth_id}'")]
    NotFound { cloth_id: String },

    /// The storage slot could not be read or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// Template rendering failed
    #[error("Render error: {0}")]
    Render(String),

    /// QR code generation failed
    #[error("QR code error: {0}")]
    QrCode(String),

    /// Configuration could not be loaded
    #[error("Configuration error: {0}")]
    Config(String),
}

fn summarize(fields: &BTreeMap<String, Vec<String>>) -> String {
    fields
        .iter()
        .map(|(field, messages)| format!("{}: {}", field, messages.join(", ")))
        .collect::<Vec<_>>()
        .join("; ")
}

/// Error response structure for HTTP responses
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    /// Error code for programmatic handling
    pub code: String,
    /// Human-readable error message
    pub message: String,
    /// Optional additional details
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl InventoryError {
    /// Build a validation error for a single field
    pub fn field(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut fields = BTreeMap::new();
        fields.insert(field.into(), vec![message.into()]);
        InventoryError::Validation(fields)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            InventoryError::Validation(_)
            | InventoryError::UnknownCategory(_)
            | InventoryError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            InventoryError::NotFound { .. } => StatusCode::NOT_FOUND,
            InventoryError::Storage(_)
            | InventoryError::Render(_)
            | InventoryError::QrCode(_)
            | InventoryError::Config(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            InventoryError::Validation(_) => "VALIDATION_ERROR",
            InventoryError::UnknownCategory(_) => "UNKNOWN_CATEGORY",
            InventoryError::InvalidBody(_) => "INVALID_BODY",
            InventoryError::NotFound { .. } => "NOT_FOUND",
            InventoryError::Storage(_) => "STORAGE_ERROR",
            InventoryError::Render(_) | InventoryError::QrCode(_) => "RENDER_ERROR",
            InventoryError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Convert to an error response
    pub fn to_response(&self) -> ErrorResponse {
        ErrorResponse {
            code: self.error_code().to_string(),
            message: self.to_string(),
            details: self.details(),
        }
    }

    fn details(&self) -> Option<serde_json::Value> {
        match self {
            InventoryError::Validation(fields) => Some(serde_json::json!({ "fields": fields })),
            InventoryError::UnknownCategory(value) => Some(serde_json::json!({
                "value": value,
                "allowed": crate::core::ClothCategory::ALL
                    .iter()
                    .map(|c| c.as_str())
                    .collect::<Vec<_>>()
            })),
            InventoryError::NotFound { cloth_id } => {
                Some(serde_json::json!({ "cloth_id": cloth_id }))
            }
            _ => None,
        }
    }
}

impl IntoResponse for InventoryError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(code = self.error_code(), "{}", self);
        }
        let body = Json(self.to_response());
        (status, body).into_response()
    }
}

impl From<validator::ValidationErrors> for InventoryError {
    fn from(errors: validator::ValidationErrors) -> Self {
        let fields = errors
            .field_errors()
            .into_iter()
            .map(|(field, errs)| {
                let messages = errs
                    .iter()
                    .map(|e| {
                        e.message
                            .as_ref()
                            .map(|m| m.to_string())
                            .unwrap_or_else(|| e.code.to_string())
                    })
                    .collect();
                (camel_case(&field), messages)
            })
            .collect();
        InventoryError::Validation(fields)
    }
}

/// Report fields under their JSON names (`owner_mobile` -> `ownerMobile`)
fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<std::io::Error> for InventoryError {
    fn from(err: std::io::Error) -> Self {
        InventoryError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for InventoryError {
    fn from(err: serde_json::Error) -> Self {
        InventoryError::Storage(format!("serialization failed: {}", err))
    }
}

impl From<tera::Error> for InventoryError {
    fn from(err: tera::Error) -> Self {
        InventoryError::Render(err.to_string())
    }
}

impl From<qrcode::types::QrError> for InventoryError {
    fn from(err: qrcode::types::QrError) -> Self {
        InventoryError::QrCode(err.to_string())
    }
}
