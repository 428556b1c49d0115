//! Blockchain integration subsystem.
//!
//! # Data Flow
//! ```text
//! Configuration (RPC URL, failovers) + optional private key from env
//!     → wallet.rs (key loading)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (submit, wait for receipt)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or sensitive data
//! - All RPC calls have configurable timeouts
//! - Graceful degradation when blockchain unreachable

pub mod client;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::BlockchainClient;
pub use transaction::TxSubmitter;
pub use types::{
    BlockchainConfig, BlockchainError, BlockchainResult, ChainId, ChainStatus, TxOutcome,
};
pub use wallet::Wallet;
