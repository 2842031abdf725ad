//! ServerBuilder for fluent API to build HTTP servers

use super::host::ServerHost;
use super::router::build_routes;
use crate::config::{AppConfig, StorageBackend};
use crate::core::{ClothIdGenerator, IdSource, RecordStore, Result};
use crate::storage::{FileSlot, JsonRecordStore};
use axum::Router;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Builder for the inventory HTTP server
///
/// Without an explicit store, the store is built from `config.storage`.
///
/// # Example
///
/// ```ignore
/// let app = ServerBuilder::new()
///     .with_config(AppConfig::from_yaml_file("luxeloop.yaml")?)
///     .build()?;
/// ```
pub struct ServerBuilder {
    config: AppConfig,
    store: Option<Arc<dyn RecordStore>>,
    ids: ClothIdGenerator,
    custom_routes: Vec<Router>,
}

impl ServerBuilder {
    /// Create a new ServerBuilder with default configuration
    pub fn new() -> Self {
        Self {
            config: AppConfig::default(),
            store: None,
            ids: ClothIdGenerator::default(),
            custom_routes: Vec::new(),
        }
    }

    pub fn with_config(mut self, config: AppConfig) -> Self {
        self.config = config;
        self
    }

    /// Use this store instead of the one described by the configuration
    pub fn with_store(mut self, store: impl RecordStore + 'static) -> Self {
        self.store = Some(Arc::new(store));
        self
    }

    pub fn with_store_arc(mut self, store: Arc<dyn RecordStore>) -> Self {
        self.store = Some(store);
        self
    }

    /// Replace the clock and random source used for new cloth ids
    pub fn with_id_source(mut self, source: impl IdSource + 'static) -> Self {
        self.ids = ClothIdGenerator::new(source);
        self
    }

    /// Add custom routes to the server
    pub fn with_custom_routes(mut self, routes: Router) -> Self {
        self.custom_routes.push(routes);
        self
    }

    fn store_from_config(config: &AppConfig) -> Arc<dyn RecordStore> {
        match config.storage.backend {
            StorageBackend::Memory => {
                tracing::warn!("using in-memory inventory; records are lost on exit");
                Arc::new(JsonRecordStore::in_memory())
            }
            StorageBackend::File => {
                tracing::info!(path = %config.storage.path.display(), "using file inventory");
                Arc::new(JsonRecordStore::new(FileSlot::new(&config.storage.path)))
            }
        }
    }

    /// Build the shared host without routing
    pub fn build_host(mut self) -> Result<ServerHost> {
        let store = self
            .store
            .take()
            .unwrap_or_else(|| Self::store_from_config(&self.config));
        ServerHost::new(self.config, store, self.ids)
    }

    /// Build the final router
    pub fn build(mut self) -> Result<Router> {
        let custom_routes = std::mem::take(&mut self.custom_routes);
        let host = Arc::new(self.build_host()?);
        Ok(build_routes(host, custom_routes))
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds to `config.server.bind` and runs until Ctrl+C or SIGTERM.
    pub async fn serve(self) -> anyhow::Result<()> {
        let addr = self.config.server.bind.clone();
        let app = self.build()?;
        let listener = TcpListener::bind(&addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }
}

impl Default for ServerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
