//! HTTP server exposing intake, the inventory list and receipts
//!
//! `ServerBuilder` wires a record store, the intake pipeline and the receipt
//! renderer into an axum router.

pub mod builder;
pub mod extractors;
pub mod handlers;
pub mod host;
pub mod router;

pub use builder::ServerBuilder;
pub use host::{AppState, ServerHost};
