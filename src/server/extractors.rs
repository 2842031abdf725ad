//! Axum extractors

use crate::core::InventoryError;
use axum::{
    Json,
    extract::{FromRequest, Request},
};
use serde::de::DeserializeOwned;

/// JSON body extractor that rejects with an [`InventoryError`]
///
/// Axum's own `Json` rejection answers in plain text; this keeps every
/// failure in the `{ code, message, details }` shape.
///
/// # Usage
///
/// ```rust,ignore
/// pub async fn create_item(JsonBody(form): JsonBody<IntakeForm>) -> Result<...> {
///     // form is a well-formed IntakeForm, not yet validated
/// }
/// ```
pub struct JsonBody<T>(pub T);

impl<S, T> FromRequest<S> for JsonBody<T>
where
    S: Send + Sync,
    T: DeserializeOwned,
{
    type Rejection = InventoryError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match Json::<T>::from_request(req, state).await {
            Ok(Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(InventoryError::InvalidBody(rejection.body_text())),
        }
    }
}
