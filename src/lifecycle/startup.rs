//! Startup orchestration.
//!
//! # Responsibilities
//! - Initialize subsystems in dependency order
//! - Start background tasks (metrics exporter, signal listener)
//! - Bind the listener and serve until shutdown
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal
//! - An unreachable chain node is not a startup error
//! - Listener starts last (traffic only when ready)

use alloy::primitives::Address;
use std::net::SocketAddr;
use std::path::Path;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;

use crate::blockchain::{BlockchainClient, BlockchainError, TxSubmitter, Wallet};
use crate::config::AppConfig;
use crate::contract::ChainRegistry;
use crate::http::server::load_tls_config;
use crate::http::HttpServer;
use crate::lifecycle::shutdown::Shutdown;
use crate::lifecycle::signals;
use crate::observability::metrics;

/// Errors that stop the portal from starting.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    #[error(transparent)]
    Blockchain(#[from] BlockchainError),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Build the chain-backed registry described by `config`.
pub fn build_registry(config: &AppConfig, client: BlockchainClient) -> Result<ChainRegistry, StartupError> {
    let contract: Address = config.contract.address.parse().map_err(|e| {
        StartupError::InvalidConfig(format!("contract.address '{}': {}", config.contract.address, e))
    })?;
    let sender = config
        .contract
        .sender
        .as_deref()
        .map(str::parse::<Address>)
        .transpose()
        .map_err(|e| StartupError::InvalidConfig(format!("contract.sender: {}", e)))?;

    Ok(ChainRegistry::new(TxSubmitter::new(client), contract, sender))
}

/// Start every subsystem and serve until a termination signal arrives.
pub async fn run(config: AppConfig) -> Result<(), StartupError> {
    tracing::info!(
        bind_address = %config.listener.bind_address,
        rpc_url = %config.blockchain.rpc_url,
        contract = %config.contract.address,
        tls = config.listener.tls.is_some(),
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        match config.observability.metrics_address.parse::<SocketAddr>() {
            Ok(addr) => metrics::init_metrics(addr),
            Err(_) => tracing::error!(
                metrics_address = %config.observability.metrics_address,
                "Failed to parse metrics address"
            ),
        }
    }

    let wallet = Wallet::from_env()?;
    let client = BlockchainClient::new(config.blockchain.clone(), wallet).await?;
    if !client.is_healthy().await {
        tracing::warn!(rpc_url = %config.blockchain.rpc_url, "Chain node unreachable, serving anyway");
    }
    let registry = build_registry(&config, client)?;

    let shutdown = Shutdown::new();
    let server_shutdown = shutdown.subscribe();
    tokio::spawn(signals::listen(shutdown.clone()));

    let server = HttpServer::new(config.clone(), Arc::new(registry));

    match &config.listener.tls {
        Some(tls) => {
            let addr: SocketAddr = config.listener.bind_address.parse().map_err(|e| {
                StartupError::InvalidConfig(format!("listener.bind_address: {}", e))
            })?;
            let rustls = load_tls_config(Path::new(&tls.cert_path), Path::new(&tls.key_path)).await?;
            server.run_tls(addr, rustls, server_shutdown).await?;
        }
        None => {
            let listener = TcpListener::bind(&config.listener.bind_address).await?;
            tracing::info!(address = %listener.local_addr()?, "Listening for connections");
            server.run(listener, server_shutdown).await?;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::BlockchainConfig;
    use crate::contract::ProductRegistry;

    async fn offline_client() -> BlockchainClient {
        let config = BlockchainConfig {
            rpc_url: "http://127.0.0.1:9".to_string(),
            rpc_timeout_secs: 1,
            ..BlockchainConfig::default()
        };
        BlockchainClient::new(config, None).await.unwrap()
    }

    #[tokio::test]
    async fn test_build_registry_from_defaults() {
        let config = AppConfig::default();
        let registry = build_registry(&config, offline_client().await).unwrap();
        assert_eq!(
            registry.contract_address(),
            "0x8e4da55c9fC4dB41659524e79E82159D62De757d".parse::<Address>().unwrap()
        );
    }

    #[tokio::test]
    async fn test_build_registry_rejects_bad_sender() {
        let mut config = AppConfig::default();
        config.contract.sender = Some("nobody".to_string());
        let err = build_registry(&config, offline_client().await).unwrap_err();
        assert!(err.to_string().contains("contract.sender"));
    }
}
