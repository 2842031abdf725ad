//! Router assembly

use crate::server::handlers::{
    create_item, dashboard, get_item, health_check, list_items, receipt_page, receipt_qr,
};
use crate::server::host::AppState;
use axum::{Router, routing::get};
use tower_http::trace::TraceLayer;

/// Build all routes over the shared state
///
/// - GET  /health                       - liveness
/// - GET  /                             - dashboard
/// - GET  /api/inventory?search=        - list with stats
/// - POST /api/inventory                - intake
/// - GET  /api/inventory/{cloth_id}     - one record as JSON
/// - GET  /receipt/{cloth_id}           - printable receipt
/// - GET  /receipt/{cloth_id}/qr.svg    - QR code of the id
pub fn build_routes(state: AppState, custom_routes: Vec<Router>) -> Router {
    let mut app = Router::new()
        .route("/health", get(health_check))
        .route("/", get(dashboard))
        .route("/api/inventory", get(list_items).post(create_item))
        .route("/api/inventory/{cloth_id}", get(get_item))
        .route("/receipt/{cloth_id}", get(receipt_page))
        .route("/receipt/{cloth_id}/qr.svg", get(receipt_qr))
        .with_state(state);

    for custom_router in custom_routes {
        app = app.merge(custom_router);
    }

    app.layer(TraceLayer::new_for_http())
}
