//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate addresses and URLs parse
//! - Validate value ranges (timeouts > 0)
//! - Cross-field checks (request timeout vs. the chain round-trip)
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: AppConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::AppConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{field}: {message}")]
pub struct ValidationError {
    /// Dotted path of the offending field.
    pub field: &'static str,
    pub message: String,
}

impl ValidationError {
    fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// Check a configuration for semantic errors.
pub fn validate_config(config: &AppConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if let Err(e) = config.listener.bind_address.parse::<SocketAddr>() {
        errors.push(ValidationError::new(
            "listener.bind_address",
            format!("'{}' is not a socket address: {}", config.listener.bind_address, e),
        ));
    }

    if let Some(tls) = &config.listener.tls {
        if tls.cert_path.trim().is_empty() {
            errors.push(ValidationError::new("listener.tls.cert_path", "must not be empty"));
        }
        if tls.key_path.trim().is_empty() {
            errors.push(ValidationError::new("listener.tls.key_path", "must not be empty"));
        }
    }

    let chain = &config.blockchain;
    if let Err(e) = chain.rpc_url.parse::<url::Url>() {
        errors.push(ValidationError::new(
            "blockchain.rpc_url",
            format!("'{}' is not a URL: {}", chain.rpc_url, e),
        ));
    }
    for failover in &chain.failover_urls {
        if let Err(e) = failover.parse::<url::Url>() {
            errors.push(ValidationError::new(
                "blockchain.failover_urls",
                format!("'{}' is not a URL: {}", failover, e),
            ));
        }
    }
    if chain.rpc_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.rpc_timeout_secs", "must be greater than 0"));
    }
    if chain.receipt_timeout_secs == 0 {
        errors.push(ValidationError::new("blockchain.receipt_timeout_secs", "must be greater than 0"));
    }
    if chain.receipt_poll_interval_ms == 0 {
        errors.push(ValidationError::new(
            "blockchain.receipt_poll_interval_ms",
            "must be greater than 0",
        ));
    }

    let chain_budget = chain_budget_secs(config);
    if config.timeouts.request_secs == 0 {
        errors.push(ValidationError::new("timeouts.request_secs", "must be greater than 0"));
    } else if config.timeouts.request_secs <= chain_budget {
        errors.push(ValidationError::new(
            "timeouts.request_secs",
            format!(
                "must be greater than the longest chain round-trip ({}s: rpc_timeout_secs across {} provider(s) plus receipt_timeout_secs)",
                chain_budget,
                1 + chain.failover_urls.len()
            ),
        ));
    }

    if let Err(e) = config.contract.address.parse::<Address>() {
        errors.push(ValidationError::new(
            "contract.address",
            format!("'{}' is not an address: {}", config.contract.address, e),
        ));
    }
    if let Some(sender) = &config.contract.sender {
        if let Err(e) = sender.parse::<Address>() {
            errors.push(ValidationError::new(
                "contract.sender",
                format!("'{}' is not an address: {}", sender, e),
            ));
        }
    }

    if config.observability.metrics_enabled {
        if let Err(e) = config.observability.metrics_address.parse::<SocketAddr>() {
            errors.push(ValidationError::new(
                "observability.metrics_address",
                format!("'{}' is not a socket address: {}", config.observability.metrics_address, e),
            ));
        }
    }

    if config.security.max_body_size == 0 {
        errors.push(ValidationError::new("security.max_body_size", "must be greater than 0"));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

/// Longest time one request can spend waiting on the chain node.
///
/// A transaction may look up the sender on every provider, send on the
/// primary, then wait for its receipt. `/health` and queries make up to
/// three read walks across every provider.
pub fn chain_budget_secs(config: &AppConfig) -> u64 {
    let chain = &config.blockchain;
    let providers = 1 + chain.failover_urls.len() as u64;
    let read_walk = chain.rpc_timeout_secs.saturating_mul(providers);

    let transaction = read_walk
        .saturating_add(chain.rpc_timeout_secs)
        .saturating_add(chain.receipt_timeout_secs);
    let reads = read_walk.saturating_mul(3);
    transaction.max(reads)
}
