//! Supply Chain Portal
//!
//! A web front-end over a deployed product registry contract, built with
//! Tokio, Axum and Alloy.
//!
//! # Architecture Overview
//!
//! ```text
//!   Browser form                ┌──────────────────────────────────────────┐
//!   ─────────────────────────▶  │  http: router → handlers → forms         │
//!                               │                 │                        │
//!                               │                 ▼                        │
//!                               │  contract: ProductRegistry (ABI encode)  │
//!                               │                 │                        │
//!                               │                 ▼                        │
//!                               │  blockchain: client ─ submit/wait ───────┼──▶ JSON-RPC node
//!   Text response               │                 │                        │
//!   ◀─────────────────────────  │  http: response (result or error text)   │
//!                               │                                          │
//!                               │  config · observability · lifecycle      │
//!                               └──────────────────────────────────────────┘
//! ```

use clap::Parser;
use std::path::PathBuf;

use supply_chain_portal::config::{resolve_config, ConfigOverrides, LogFormat};
use supply_chain_portal::lifecycle::startup;
use supply_chain_portal::observability::init_logging;

#[derive(Parser)]
#[command(name = "supply-chain-portal")]
#[command(about = "Web front-end for the product registry contract", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, env = "PORTAL_CONFIG")]
    config: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:5000.
    #[arg(long, env = "PORTAL_BIND")]
    bind: Option<String>,

    /// Chain node JSON-RPC endpoint.
    #[arg(long, env = "PORTAL_RPC_URL")]
    rpc_url: Option<String>,

    /// Address of the deployed product registry.
    #[arg(long, env = "PORTAL_CONTRACT_ADDRESS")]
    contract_address: Option<String>,

    /// Node-managed account to send transactions from.
    #[arg(long, env = "PORTAL_SENDER")]
    sender: Option<String>,

    /// Log output format: pretty or json.
    #[arg(long, env = "PORTAL_LOG_FORMAT")]
    log_format: Option<LogFormat>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let overrides = ConfigOverrides {
        bind_address: cli.bind,
        rpc_url: cli.rpc_url,
        contract_address: cli.contract_address,
        sender: cli.sender,
        log_format: cli.log_format,
    };
    let config = resolve_config(cli.config.as_deref(), overrides)?;

    init_logging(&config.observability);
    tracing::info!("supply-chain-portal v{} starting", env!("CARGO_PKG_VERSION"));

    startup::run(config).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
