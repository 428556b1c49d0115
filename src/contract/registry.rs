//! Product registry operations.
//!
//! # Responsibilities
//! - Define the `ProductRegistry` seam the HTTP layer talks to
//! - Encode calls against the fixed ABI and decode their results
//! - Resolve the default sender account
//! - Record every contract interaction in logs and metrics

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, U256};
use alloy::rpc::types::TransactionRequest;
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use std::time::Instant;
use tokio::sync::OnceCell;

use crate::blockchain::types::{BlockchainError, BlockchainResult, ChainStatus, TxOutcome};
use crate::blockchain::TxSubmitter;
use crate::contract::abi::{
    getOwnershipHistoryCall, getProductCall, markAsDeliveredCall, registerProductCall,
    transferOwnershipCall,
};
use crate::contract::events::{decode_events, registered_product_id};
use crate::contract::types::{OwnershipHistory, Product};
use crate::observability::metrics;

/// Operations the portal performs against the registry contract.
///
/// Transactions return once mined; calls return decoded data.
#[async_trait]
pub trait ProductRegistry: Send + Sync {
    /// `registerProduct(name, manufacturer)`.
    async fn register_product(&self, name: &str, manufacturer: &str) -> BlockchainResult<TxOutcome>;

    /// `transferOwnership(productId, newOwner)`.
    async fn transfer_ownership(&self, product_id: U256, new_owner: Address) -> BlockchainResult<TxOutcome>;

    /// `markAsDelivered(productId)`.
    async fn mark_as_delivered(&self, product_id: U256) -> BlockchainResult<TxOutcome>;

    /// `getProduct(productId)`.
    async fn get_product(&self, product_id: U256) -> BlockchainResult<Product>;

    /// `getOwnershipHistory(productId)`.
    async fn get_ownership_history(&self, product_id: U256) -> BlockchainResult<OwnershipHistory>;

    /// Chain id, head block and sender, for health reporting.
    async fn chain_status(&self) -> BlockchainResult<ChainStatus>;

    /// Address of the registry contract.
    fn contract_address(&self) -> Address;
}

/// Registry backed by a live chain node.
#[derive(Debug)]
pub struct ChainRegistry {
    submitter: TxSubmitter,
    contract: Address,
    configured_sender: Option<Address>,
    /// Node account looked up on first use.
    node_sender: OnceCell<Address>,
}

impl ChainRegistry {
    /// Create a registry for the contract at `contract`.
    ///
    /// # Arguments
    /// * `submitter` - Transaction submitter wrapping the RPC client
    /// * `contract` - Address of the deployed registry
    /// * `configured_sender` - Sender to use when no local signer is loaded
    pub fn new(submitter: TxSubmitter, contract: Address, configured_sender: Option<Address>) -> Self {
        Self {
            submitter,
            contract,
            configured_sender,
            node_sender: OnceCell::new(),
        }
    }

    /// The account transactions are sent from.
    ///
    /// Local signer first, then the configured sender, then the node's
    /// first account.
    pub async fn sender(&self) -> BlockchainResult<Address> {
        if let Some(signer) = self.submitter.client().signer() {
            return Ok(signer);
        }
        if let Some(sender) = self.configured_sender {
            return Ok(sender);
        }

        let client = self.submitter.client();
        self.node_sender
            .get_or_try_init(|| async {
                let accounts = client.get_accounts().await?;
                let first = accounts.first().copied().ok_or(BlockchainError::NoAccounts)?;
                tracing::info!(sender = %first, "Using node account as default sender");
                Ok::<_, BlockchainError>(first)
            })
            .await
            .copied()
    }

    async fn transact<C>(&self, call: C) -> BlockchainResult<TxOutcome>
    where
        C: SolCall + Send,
    {
        let function = function_name::<C>();
        let start = Instant::now();
        let result = self.submit(call).await;
        metrics::record_contract_call(function, result.is_ok(), start);

        match &result {
            Ok(outcome) => tracing::info!(
                function,
                tx_hash = %outcome.tx_hash,
                block_number = ?outcome.block_number,
                gas_used = outcome.gas_used,
                "Transaction mined"
            ),
            Err(e) => tracing::warn!(function, error = %e, "Transaction failed"),
        }
        result
    }

    async fn submit<C>(&self, call: C) -> BlockchainResult<TxOutcome>
    where
        C: SolCall + Send,
    {
        let from = self.sender().await?;
        let tx = TransactionRequest::default()
            .with_from(from)
            .with_to(self.contract)
            .with_input(call.abi_encode());

        let receipt = self.submitter.submit_and_wait(tx).await?;

        let events = decode_events(receipt.inner.logs(), self.contract);
        for event in &events {
            tracing::info!(tx_hash = %receipt.transaction_hash, event = %event, "Registry event");
        }

        Ok(TxOutcome {
            tx_hash: receipt.transaction_hash,
            block_number: receipt.block_number,
            gas_used: receipt.gas_used,
            product_id: registered_product_id(&events),
        })
    }

    async fn view<C>(&self, call: C) -> BlockchainResult<C::Return>
    where
        C: SolCall + Send,
        C::Return: Send,
    {
        let function = function_name::<C>();
        let start = Instant::now();

        let mut tx = TransactionRequest::default()
            .with_to(self.contract)
            .with_input(call.abi_encode());
        // eth_call works without a sender; use it when one can be resolved.
        if let Ok(from) = self.sender().await {
            tx = tx.with_from(from);
        }

        let result = match self.submitter.client().call(tx).await {
            Ok(data) => C::abi_decode_returns(&data).map_err(|e| BlockchainError::Decode {
                function,
                reason: e.to_string(),
            }),
            Err(e) => Err(e),
        };
        metrics::record_contract_call(function, result.is_ok(), start);

        if let Err(e) = &result {
            tracing::warn!(function, error = %e, "Contract call failed");
        }
        result
    }
}

#[async_trait]
impl ProductRegistry for ChainRegistry {
    async fn register_product(&self, name: &str, manufacturer: &str) -> BlockchainResult<TxOutcome> {
        tracing::debug!(name, manufacturer, "Registering product");
        let outcome = self
            .transact(registerProductCall {
                name: name.to_string(),
                manufacturer: manufacturer.to_string(),
            })
            .await?;
        if let Some(product_id) = outcome.product_id {
            tracing::info!(product_id = %product_id, name, "Product registered");
        }
        Ok(outcome)
    }

    async fn transfer_ownership(&self, product_id: U256, new_owner: Address) -> BlockchainResult<TxOutcome> {
        tracing::debug!(product_id = %product_id, new_owner = %new_owner, "Transferring ownership");
        self.transact(transferOwnershipCall {
            productId: product_id,
            newOwner: new_owner,
        })
        .await
    }

    async fn mark_as_delivered(&self, product_id: U256) -> BlockchainResult<TxOutcome> {
        tracing::debug!(product_id = %product_id, "Marking product delivered");
        self.transact(markAsDeliveredCall { productId: product_id }).await
    }

    async fn get_product(&self, product_id: U256) -> BlockchainResult<Product> {
        self.view(getProductCall { productId: product_id })
            .await
            .map(Product::from)
    }

    async fn get_ownership_history(&self, product_id: U256) -> BlockchainResult<OwnershipHistory> {
        self.view(getOwnershipHistoryCall { productId: product_id })
            .await
            .map(OwnershipHistory)
    }

    async fn chain_status(&self) -> BlockchainResult<ChainStatus> {
        let client = self.submitter.client();
        let chain_id = client.get_chain_id().await?;
        let block_number = client.get_block_number().await?;
        Ok(ChainStatus {
            chain_id,
            block_number,
            sender: self.sender().await.ok(),
        })
    }

    fn contract_address(&self) -> Address {
        self.contract
    }
}

/// Function name without its parameter list, e.g. `getProduct`.
fn function_name<C: SolCall>() -> &'static str {
    C::SIGNATURE
        .split_once('(')
        .map(|(name, _)| name)
        .unwrap_or(C::SIGNATURE)
}
