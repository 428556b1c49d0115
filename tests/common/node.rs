//! Scripted JSON-RPC node for driving the chain-backed registry.
#![allow(dead_code)]

use alloy::primitives::{Address, Bloom, Bytes, TxHash, B256, U256};
use alloy::sol_types::SolEvent;
use axum::{extract::State, routing::post, Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::net::TcpListener;

use supply_chain_portal::contract::abi::ProductRegistered;

/// Hash the node assigns to every submitted transaction.
pub const TX_HASH: TxHash = TxHash::repeat_byte(0x11);
pub const BLOCK_HASH: B256 = B256::repeat_byte(0x22);

/// Canned answers for one test.
#[derive(Debug, Clone)]
pub struct NodeScript {
    pub chain_id: u64,
    pub accounts: Vec<Address>,
    /// Status of the mined receipt.
    pub receipt_status: bool,
    pub receipt_block: u64,
    /// Receipt lookups answered with `null` before the receipt appears.
    pub pending_polls: usize,
    pub receipt_logs: Vec<Value>,
    pub gas_used: u64,
    pub head_block: u64,
    /// Move the head forward one block on every `eth_blockNumber`.
    pub advance_head: bool,
    /// `eth_call` return data, or the revert reason.
    pub call_result: Result<Bytes, String>,
}

impl Default for NodeScript {
    fn default() -> Self {
        Self {
            chain_id: 1337,
            accounts: Vec::new(),
            receipt_status: true,
            receipt_block: 5,
            pending_polls: 0,
            receipt_logs: Vec::new(),
            gas_used: 48_000,
            head_block: 5,
            advance_head: false,
            call_result: Ok(Bytes::new()),
        }
    }
}

/// A running scripted node and the requests it has seen.
pub struct MockNode {
    script: NodeScript,
    head: AtomicU64,
    receipt_polls: AtomicUsize,
    requests: Mutex<Vec<(String, Value)>>,
}

impl MockNode {
    /// Number of requests received for `method`.
    pub fn count(&self, method: &str) -> usize {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .count()
    }

    /// Params of every request received for `method`, oldest first.
    pub fn params(&self, method: &str) -> Vec<Value> {
        self.requests
            .lock()
            .unwrap()
            .iter()
            .filter(|(m, _)| m == method)
            .map(|(_, params)| params.clone())
            .collect()
    }

    fn answer(&self, method: &str) -> Result<Value, Value> {
        let script = &self.script;
        match method {
            "eth_chainId" => Ok(quantity(script.chain_id)),
            "eth_blockNumber" => {
                let head = if script.advance_head {
                    self.head.fetch_add(1, Ordering::SeqCst)
                } else {
                    self.head.load(Ordering::SeqCst)
                };
                Ok(quantity(head))
            }
            "eth_accounts" => Ok(json!(script.accounts)),
            "eth_sendTransaction" => Ok(json!(TX_HASH)),
            "eth_getTransactionReceipt" => {
                if self.receipt_polls.fetch_add(1, Ordering::SeqCst) < script.pending_polls {
                    Ok(Value::Null)
                } else {
                    Ok(self.receipt())
                }
            }
            "eth_call" => match &script.call_result {
                Ok(data) => Ok(json!(data)),
                Err(reason) => Err(json!({
                    "code": 3,
                    "message": format!("execution reverted: {}", reason),
                    "data": "0x",
                })),
            },
            other => Err(json!({
                "code": -32601,
                "message": format!("the method {} does not exist", other),
            })),
        }
    }

    fn receipt(&self) -> Value {
        let sent = self.params("eth_sendTransaction");
        let tx = sent.last().map(|p| p[0].clone()).unwrap_or(Value::Null);
        let gas = quantity(self.script.gas_used);

        json!({
            "type": "0x0",
            "status": if self.script.receipt_status { "0x1" } else { "0x0" },
            "cumulativeGasUsed": gas,
            "logs": self.script.receipt_logs,
            "logsBloom": Bloom::ZERO,
            "transactionHash": TX_HASH,
            "transactionIndex": "0x0",
            "blockHash": BLOCK_HASH,
            "blockNumber": quantity(self.script.receipt_block),
            "gasUsed": gas,
            "effectiveGasPrice": "0x1",
            "from": tx.get("from").cloned().unwrap_or(json!(Address::ZERO)),
            "to": tx.get("to").cloned().unwrap_or(Value::Null),
            "contractAddress": null,
        })
    }
}

fn quantity(n: u64) -> Value {
    json!(format!("{:#x}", n))
}

/// A `ProductRegistered` log as it appears in a receipt.
pub fn registered_log(emitter: Address, product_id: u64, name: &str, manufacturer: &str) -> Value {
    let event = ProductRegistered {
        productId: U256::from(product_id),
        name: name.to_string(),
        manufacturer: manufacturer.to_string(),
    };
    json!({
        "address": emitter,
        "topics": [ProductRegistered::SIGNATURE_HASH],
        "data": Bytes::from(event.encode_data()),
        "blockHash": BLOCK_HASH,
        "blockNumber": "0x5",
        "transactionHash": TX_HASH,
        "transactionIndex": "0x0",
        "logIndex": "0x0",
        "removed": false,
    })
}

/// Input bytes of a transaction or call request as sent by the client.
pub fn request_input(request: &Value) -> Bytes {
    let input = request
        .get("input")
        .or_else(|| request.get("data"))
        .and_then(Value::as_str)
        .unwrap_or("0x");
    input.parse().unwrap()
}

/// Address field (`from`, `to`) of a transaction or call request.
pub fn request_address(request: &Value, field: &str) -> Option<Address> {
    request.get(field).and_then(Value::as_str).map(|a| a.parse().unwrap())
}

async fn rpc(State(node): State<Arc<MockNode>>, Json(request): Json<Value>) -> Json<Value> {
    let id = request["id"].clone();
    let method = request["method"].as_str().unwrap_or_default().to_string();
    let params = request.get("params").cloned().unwrap_or(Value::Null);
    node.requests.lock().unwrap().push((method.clone(), params));

    Json(match node.answer(&method) {
        Ok(result) => json!({ "jsonrpc": "2.0", "id": id, "result": result }),
        Err(error) => json!({ "jsonrpc": "2.0", "id": id, "error": error }),
    })
}

/// Serve `script` on 127.0.0.1 with a random port. Returns the RPC URL.
pub async fn start_node(script: NodeScript) -> (String, Arc<MockNode>) {
    let node = Arc::new(MockNode {
        head: AtomicU64::new(script.head_block),
        receipt_polls: AtomicUsize::new(0),
        requests: Mutex::new(Vec::new()),
        script,
    });

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    let app = Router::new().route("/", post(rpc)).with_state(node.clone());
    tokio::spawn(async move {
        let _ = axum::serve(listener, app).await;
    });

    (format!("http://{}", addr), node)
}
