//! Registry events found in transaction receipts.

use alloy::primitives::{Address, U256};
use alloy::rpc::types::Log;

use crate::contract::abi::{OwnershipTransferred, ProductDelivered, ProductRegistered};

/// A decoded event emitted by the registry contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RegistryEvent {
    Registered {
        product_id: U256,
        name: String,
        manufacturer: String,
    },
    OwnershipTransferred {
        product_id: U256,
        from: Address,
        to: Address,
    },
    Delivered {
        product_id: U256,
    },
}

impl std::fmt::Display for RegistryEvent {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegistryEvent::Registered {
                product_id,
                name,
                manufacturer,
            } => write!(f, "ProductRegistered({}, '{}', '{}')", product_id, name, manufacturer),
            RegistryEvent::OwnershipTransferred { product_id, from, to } => {
                write!(f, "OwnershipTransferred({}, {}, {})", product_id, from, to)
            }
            RegistryEvent::Delivered { product_id } => write!(f, "ProductDelivered({})", product_id),
        }
    }
}

/// Decode every registry event emitted by `contract` in `logs`.
///
/// Logs from other contracts and unknown topics are skipped.
pub fn decode_events(logs: &[Log], contract: Address) -> Vec<RegistryEvent> {
    logs.iter()
        .filter(|log| log.address() == contract)
        .filter_map(decode_event)
        .collect()
}

fn decode_event(log: &Log) -> Option<RegistryEvent> {
    if let Ok(decoded) = log.log_decode::<ProductRegistered>() {
        let event = decoded.inner.data;
        return Some(RegistryEvent::Registered {
            product_id: event.productId,
            name: event.name,
            manufacturer: event.manufacturer,
        });
    }
    if let Ok(decoded) = log.log_decode::<OwnershipTransferred>() {
        let event = decoded.inner.data;
        return Some(RegistryEvent::OwnershipTransferred {
            product_id: event.productId,
            from: event.from,
            to: event.to,
        });
    }
    if let Ok(decoded) = log.log_decode::<ProductDelivered>() {
        return Some(RegistryEvent::Delivered {
            product_id: decoded.inner.data.productId,
        });
    }
    None
}

/// Product id assigned by the first `ProductRegistered` event, if any.
pub fn registered_product_id(events: &[RegistryEvent]) -> Option<U256> {
    events.iter().find_map(|event| match event {
        RegistryEvent::Registered { product_id, .. } => Some(*product_id),
        _ => None,
    })
}
