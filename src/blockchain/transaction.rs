//! Transaction submission and confirmation monitoring.
//!
//! # Responsibilities
//! - Submit transactions through the client
//! - Poll for the receipt until included with the required depth
//! - Turn reverted receipts and wait timeouts into errors

use alloy::primitives::TxHash;
use alloy::rpc::types::{TransactionReceipt, TransactionRequest};
use std::time::Duration;
use tokio::time::{interval, timeout, MissedTickBehavior};

use crate::blockchain::client::BlockchainClient;
use crate::blockchain::types::{BlockchainError, BlockchainResult};

/// Submits transactions and waits for them to be mined.
#[derive(Debug, Clone)]
pub struct TxSubmitter {
    client: BlockchainClient,
    receipt_timeout: Duration,
    poll_interval: Duration,
}

impl TxSubmitter {
    /// Create a submitter using the client's receipt wait settings.
    pub fn new(client: BlockchainClient) -> Self {
        let receipt_timeout = Duration::from_secs(client.config().receipt_timeout_secs);
        let poll_interval = Duration::from_millis(client.config().receipt_poll_interval_ms);
        Self {
            client,
            receipt_timeout,
            poll_interval,
        }
    }

    /// Send a transaction, then block until it is mined.
    ///
    /// Returns the receipt only when the transaction succeeded.
    pub async fn submit_and_wait(&self, tx: TransactionRequest) -> BlockchainResult<TransactionReceipt> {
        let tx_hash = self.client.send_transaction(tx).await?;
        tracing::debug!(tx_hash = %tx_hash, "Transaction submitted");
        self.wait_for_confirmation(tx_hash).await
    }

    /// Wait for a transaction to be confirmed.
    ///
    /// # Arguments
    /// * `tx_hash` - Transaction hash to monitor
    pub async fn wait_for_confirmation(&self, tx_hash: TxHash) -> BlockchainResult<TransactionReceipt> {
        let required_confirmations = self.client.confirmation_blocks();

        let result = timeout(self.receipt_timeout, async {
            let mut ticker = interval(self.poll_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

            loop {
                ticker.tick().await;

                // Get the receipt
                let receipt = match self.client.get_transaction_receipt(tx_hash).await? {
                    Some(r) => r,
                    None => {
                        tracing::debug!(tx_hash = %tx_hash, "Transaction pending");
                        continue;
                    }
                };

                // Check if transaction succeeded
                if !receipt.status() {
                    return Err(BlockchainError::Reverted(format!(
                        "transaction {} failed in block {}",
                        tx_hash,
                        receipt
                            .block_number
                            .map(|n| n.to_string())
                            .unwrap_or_else(|| "unknown".to_string())
                    )));
                }

                if required_confirmations == 0 {
                    return Ok(receipt);
                }

                // Get current block number
                let current_block = self.client.get_block_number().await?;
                let tx_block = receipt.block_number.unwrap_or(current_block);
                let confirmations = current_block.saturating_sub(tx_block) as u32;

                if confirmations >= required_confirmations {
                    return Ok(receipt);
                }

                tracing::debug!(
                    tx_hash = %tx_hash,
                    confirmations = confirmations,
                    required = required_confirmations,
                    "Waiting for confirmations"
                );
            }
        })
        .await;

        match result {
            Ok(outcome) => outcome,
            Err(_) => Err(BlockchainError::ConfirmationTimeout {
                tx_hash,
                waited_secs: self.receipt_timeout.as_secs(),
            }),
        }
    }

    /// The client transactions are sent through.
    pub fn client(&self) -> &BlockchainClient {
        &self.client
    }
}
