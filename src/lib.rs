//! Supply Chain Portal Library
//!
//! Web forms over a deployed product provenance registry contract.

pub mod blockchain;
pub mod config;
pub mod contract;
pub mod http;
pub mod lifecycle;
pub mod observability;

pub use config::AppConfig;
pub use contract::{ChainRegistry, ProductRegistry};
pub use http::HttpServer;
pub use lifecycle::Shutdown;
