//! Chain-specific types and error definitions.

use alloy::primitives::{Address, TxHash, U256};
use serde::Serialize;
use thiserror::Error;

// Re-export BlockchainConfig from config module to avoid duplication
pub use crate::config::schema::BlockchainConfig;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during blockchain operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Transaction receipt did not appear within the wait bound.
    #[error("Transaction {tx_hash} not confirmed after {waited_secs} seconds")]
    ConfirmationTimeout { tx_hash: TxHash, waited_secs: u64 },

    /// Transaction was reverted on-chain.
    #[error("Transaction reverted: {0}")]
    Reverted(String),

    /// Invalid private key format or derivation error.
    #[error("Wallet error: {0}")]
    Wallet(String),

    /// Chain configuration mismatch.
    #[error("Chain ID mismatch: expected {expected}, got {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    /// The node has no managed account to send from.
    #[error("Node reports no accounts and no sender is configured")]
    NoAccounts,

    /// Return data could not be decoded against the ABI.
    #[error("Failed to decode {function} result: {reason}")]
    Decode { function: &'static str, reason: String },
}

/// Result type for blockchain operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// Summary of a mined, successful transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TxOutcome {
    pub tx_hash: TxHash,
    pub block_number: Option<u64>,
    pub gas_used: u64,
    /// Product assigned by a `ProductRegistered` event in the receipt.
    pub product_id: Option<U256>,
}

/// Snapshot of the node as seen by the portal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChainStatus {
    pub chain_id: ChainId,
    pub block_number: u64,
    pub sender: Option<Address>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(1337u64);
        assert_eq!(chain_id.0, 1337);
        assert_eq!(u64::from(chain_id), 1337);
    }

    #[test]
    fn test_default_config() {
        let config = BlockchainConfig::default();
        assert_eq!(config.rpc_timeout_secs, 10);
        assert_eq!(config.confirmation_blocks, 0);
        assert_eq!(config.receipt_timeout_secs, 120);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::ConfirmationTimeout {
            tx_hash: TxHash::ZERO,
            waited_secs: 120,
        };
        assert!(err.to_string().ends_with("not confirmed after 120 seconds"));

        let err = BlockchainError::Decode {
            function: "getProduct",
            reason: "buffer overrun".to_string(),
        };
        assert_eq!(err.to_string(), "Failed to decode getProduct result: buffer overrun");
    }
}
