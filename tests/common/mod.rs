//! Shared utilities for integration testing.

pub mod node;

use alloy::primitives::{address, Address, TxHash, U256};
use async_trait::async_trait;
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use supply_chain_portal::blockchain::{BlockchainError, BlockchainResult, ChainId, ChainStatus, TxOutcome};
use supply_chain_portal::config::AppConfig;
use supply_chain_portal::contract::{OwnershipHistory, Product, ProductRegistry};
use supply_chain_portal::{HttpServer, Shutdown};

pub const REGISTRY_ADDRESS: Address = address!("8e4da55c9fc4db41659524e79e82159d62de757d");
pub const OWNER_A: Address = address!("f39fd6e51aad88f6f4ce6ab8827279cfffb92266");
pub const OWNER_B: Address = address!("70997970c51812dc3a010c7d01b50e0d17dc79c8");

/// A contract interaction observed by the stub.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecordedCall {
    Register { name: String, manufacturer: String },
    Transfer { product_id: U256, new_owner: Address },
    Deliver { product_id: U256 },
    GetProduct { product_id: U256 },
    GetHistory { product_id: U256 },
}

/// How the stub fails every contract interaction.
#[derive(Debug, Clone, Copy)]
#[allow(dead_code)]
pub enum Failure {
    Reverted,
    Unreachable,
    ReceiptTimeout,
}

impl Failure {
    fn error(self) -> BlockchainError {
        match self {
            Failure::Reverted => BlockchainError::Reverted("Product does not exist".to_string()),
            Failure::Unreachable => BlockchainError::Rpc("connection refused".to_string()),
            Failure::ReceiptTimeout => BlockchainError::ConfirmationTimeout {
                tx_hash: TxHash::ZERO,
                waited_secs: 120,
            },
        }
    }
}

/// In-memory stand-in for the chain-backed registry.
pub struct StubRegistry {
    calls: Mutex<Vec<RecordedCall>>,
    failure: Option<Failure>,
}

#[allow(dead_code)]
impl StubRegistry {
    pub fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: None,
        })
    }

    pub fn failing(failure: Failure) -> Arc<Self> {
        Arc::new(Self {
            calls: Mutex::new(Vec::new()),
            failure: Some(failure),
        })
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        self.calls.lock().unwrap().clone()
    }

    fn record(&self, call: RecordedCall) -> BlockchainResult<()> {
        self.calls.lock().unwrap().push(call);
        match self.failure {
            Some(failure) => Err(failure.error()),
            None => Ok(()),
        }
    }

    fn outcome(product_id: Option<U256>) -> TxOutcome {
        TxOutcome {
            tx_hash: TxHash::repeat_byte(0xab),
            block_number: Some(12),
            gas_used: 48_000,
            product_id,
        }
    }
}

#[async_trait]
impl ProductRegistry for StubRegistry {
    async fn register_product(&self, name: &str, manufacturer: &str) -> BlockchainResult<TxOutcome> {
        self.record(RecordedCall::Register {
            name: name.to_string(),
            manufacturer: manufacturer.to_string(),
        })?;
        Ok(Self::outcome(Some(U256::from(1))))
    }

    async fn transfer_ownership(&self, product_id: U256, new_owner: Address) -> BlockchainResult<TxOutcome> {
        self.record(RecordedCall::Transfer { product_id, new_owner })?;
        Ok(Self::outcome(None))
    }

    async fn mark_as_delivered(&self, product_id: U256) -> BlockchainResult<TxOutcome> {
        self.record(RecordedCall::Deliver { product_id })?;
        Ok(Self::outcome(None))
    }

    async fn get_product(&self, product_id: U256) -> BlockchainResult<Product> {
        self.record(RecordedCall::GetProduct { product_id })?;
        Ok(Product {
            id: product_id,
            name: "Widget".to_string(),
            manufacturer: "Acme".to_string(),
            current_owner: OWNER_B,
            timestamp: U256::from(1_700_000_000u64),
            is_delivered: true,
        })
    }

    async fn get_ownership_history(&self, product_id: U256) -> BlockchainResult<OwnershipHistory> {
        self.record(RecordedCall::GetHistory { product_id })?;
        Ok(OwnershipHistory(vec![OWNER_A, OWNER_B]))
    }

    async fn chain_status(&self) -> BlockchainResult<ChainStatus> {
        match self.failure {
            Some(failure) => Err(failure.error()),
            None => Ok(ChainStatus {
                chain_id: ChainId(1337),
                block_number: 12,
                sender: Some(OWNER_A),
            }),
        }
    }

    fn contract_address(&self) -> Address {
        REGISTRY_ADDRESS
    }
}

/// A portal serving on an ephemeral port.
pub struct TestPortal {
    pub base_url: String,
    shutdown: Shutdown,
}

impl TestPortal {
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

impl Drop for TestPortal {
    fn drop(&mut self) {
        self.shutdown.trigger();
    }
}

/// Start a portal backed by `registry` on 127.0.0.1 with a random port.
pub async fn start_portal(registry: Arc<dyn ProductRegistry>) -> TestPortal {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let shutdown = Shutdown::new();
    let server = HttpServer::new(AppConfig::default(), registry);
    let server_shutdown = shutdown.subscribe();

    tokio::spawn(async move {
        let _ = server.run(listener, server_shutdown).await;
    });

    TestPortal {
        base_url: format!("http://{}", addr),
        shutdown,
    }
}

pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .no_proxy()
        .build()
        .expect("reqwest client")
}
