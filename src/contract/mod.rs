//! Product registry contract binding.
//!
//! # Data Flow
//! ```text
//! typed arguments (from HTTP forms)
//!     → abi.rs (calldata encoding)
//!     → registry.rs (transaction or eth_call through the blockchain client)
//!     → events.rs (receipt logs) / types.rs (decoded return data)
//! ```

pub mod abi;
pub mod events;
pub mod registry;
pub mod types;

pub use events::RegistryEvent;
pub use registry::{ChainRegistry, ProductRegistry};
pub use types::{OwnershipHistory, Product};
