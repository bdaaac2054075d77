//! Tourism Node - Governance ledger service.
//!
//! Loads configuration, installs logging and serves the governance REST API.

pub mod config;
pub mod service;
pub mod telemetry;

use clap::Parser;
use config::{NodeConfig, StorageBackend};
use std::net::SocketAddr;
use std::path::PathBuf;
use tracing::{error, info};

/// Command-line arguments.
///
/// Every flag overrides the config file, which overrides the defaults.
#[derive(Parser, Debug)]
#[command(name = "tourism-node")]
#[command(about = "Governance ledger service for the Jharkhand tourism platform")]
#[command(version = env!("CARGO_PKG_VERSION"))]
struct Args {
    /// Config file path
    #[arg(short, long, value_name = "FILE", env = "TOURISM_CONFIG")]
    config: Option<PathBuf>,

    /// Data directory
    #[arg(short, long, env = "TOURISM_DATA_DIR")]
    data_dir: Option<PathBuf>,

    /// HTTP listen address
    #[arg(long, env = "TOURISM_HTTP_ADDR")]
    http_addr: Option<SocketAddr>,

    /// Storage backend
    #[arg(long, value_enum, env = "TOURISM_STORAGE")]
    storage: Option<StorageBackend>,

    /// Log level or filter directive
    #[arg(short, long, env = "TOURISM_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format
    #[arg(long, env = "TOURISM_LOG_FORMAT", value_parser = ["pretty", "json"])]
    log_format: Option<String>,
}

impl Args {
    fn load_config(&self) -> anyhow::Result<NodeConfig> {
        let mut config = match &self.config {
            Some(path) => NodeConfig::from_file(path)?,
            None => NodeConfig::default(),
        };

        if let Some(data_dir) = &self.data_dir {
            config.data_dir = data_dir.clone();
        }
        if let Some(http_addr) = self.http_addr {
            config.api.http_addr = http_addr;
        }
        if let Some(storage) = self.storage {
            config.storage.backend = storage;
        }
        if let Some(level) = &self.log_level {
            config.logging.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.logging.format = format.clone();
        }

        config.validate()?;
        Ok(config)
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = args.load_config()?;

    telemetry::init_telemetry(&config.logging)?;

    match &args.config {
        Some(path) => info!("Loaded configuration from {:?}", path),
        None => info!("Using default configuration"),
    }
    info!("Configuration:");
    info!("  Name: {}", config.name);
    info!("  Data dir: {:?}", config.data_dir);
    info!("  HTTP addr: {}", config.api.http_addr);
    info!("  Storage: {:?}", config.storage.backend);
    info!("  Eligible voters: {}", config.governance.eligible_voters);
    info!("  Quorum gates approval: {}", config.governance.quorum_gates_approval);
    info!("  One vote per voter: {}", config.governance.one_vote_per_voter);

    if let Err(e) = service::run(config).await {
        error!("Service error: {}", e);
        return Err(e);
    }

    info!("Tourism node shutdown complete");
    Ok(())
}
