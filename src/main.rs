//! Luxeloop inventory server.

use std::path::PathBuf;

use clap::Parser;
use luxeloop::prelude::*;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "luxeloop")]
#[command(about = "Garment intake, receipts and inventory listing")]
struct Cli {
    /// YAML configuration file
    #[arg(short, long, env = "LUXELOOP_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on (overrides server.bind)
    #[arg(long)]
    bind: Option<String>,

    /// Inventory file (overrides storage.path)
    #[arg(long)]
    data: Option<PathBuf>,

    /// Keep the inventory in memory only
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("luxeloop=info,tower_http=info")),
        )
        .init();

    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => AppConfig::from_yaml_file(path)?,
        None => AppConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.server.bind = bind;
    }
    if let Some(data) = cli.data {
        config.storage.path = data;
    }
    if cli.memory {
        config.storage.backend = StorageBackend::Memory;
    }

    ServerBuilder::new().with_config(config).serve().await
}
