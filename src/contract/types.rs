//! Typed views of registry state.

use alloy::primitives::{Address, U256};
use serde::Serialize;

use crate::contract::abi::getProductReturn;

/// A product record as returned by `getProduct`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Product {
    pub id: U256,
    pub name: String,
    pub manufacturer: String,
    pub current_owner: Address,
    /// Registration time, in seconds since the epoch.
    pub timestamp: U256,
    pub is_delivered: bool,
}

impl From<getProductReturn> for Product {
    fn from(ret: getProductReturn) -> Self {
        Self {
            id: ret.id,
            name: ret.name,
            manufacturer: ret.manufacturer,
            current_owner: ret.currentOwner,
            timestamp: ret.timestamp,
            is_delivered: ret.isDelivered,
        }
    }
}

/// Renders like the list a web3 client prints: strings and checksummed
/// addresses quoted, booleans capitalized.
impl std::fmt::Display for Product {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "[{}, '{}', '{}', '{}', {}, {}]",
            self.id,
            self.name,
            self.manufacturer,
            self.current_owner,
            self.timestamp,
            if self.is_delivered { "True" } else { "False" }
        )
    }
}

/// Ordered list of owners, oldest first.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct OwnershipHistory(pub Vec<Address>);

impl std::fmt::Display for OwnershipHistory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[")?;
        for (i, owner) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ", ")?;
            }
            write!(f, "'{}'", owner)?;
        }
        write!(f, "]")
    }
}
