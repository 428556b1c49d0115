//! Text responses for form submissions.
//!
//! Every outcome is rendered as plain text with status 200. Failures of any
//! kind share one shape, `An error occurred: {message}`.

use alloy::primitives::U256;
use axum::extract::rejection::FormRejection;
use std::time::Instant;
use thiserror::Error;

use crate::blockchain::BlockchainError;
use crate::contract::{OwnershipHistory, Product};
use crate::http::forms::{FormError, Registration, Transfer};
use crate::observability::metrics;

/// Prefix of every failure response.
pub const ERROR_PREFIX: &str = "An error occurred: ";

/// Anything that can go wrong between receiving a form and answering it.
#[derive(Debug, Error)]
pub enum SubmissionError {
    /// The body was not a form at all.
    #[error(transparent)]
    Rejected(#[from] FormRejection),

    #[error(transparent)]
    Form(#[from] FormError),

    #[error(transparent)]
    Chain(#[from] BlockchainError),
}

pub fn registered(registration: &Registration) -> String {
    format!(
        "Product '{}' registered successfully with manufacturer '{}'.",
        registration.name, registration.manufacturer
    )
}

pub fn transferred(transfer: &Transfer) -> String {
    format!(
        "Ownership of product ID {} transferred to '{}'.",
        transfer.product_id, transfer.new_owner_input
    )
}

pub fn delivered(product_id: U256) -> String {
    format!("Product ID {} marked as delivered.", product_id)
}

pub fn product_details(product: &Product) -> String {
    format!("Product Details: {}", product)
}

pub fn ownership_history(history: &OwnershipHistory) -> String {
    format!("Ownership History: {}", history)
}

pub fn error_text(error: &SubmissionError) -> String {
    format!("{}{}", ERROR_PREFIX, error)
}

/// Turn a submission result into the response body, logging and counting it.
pub fn respond(route: &'static str, start: Instant, result: Result<String, SubmissionError>) -> String {
    match result {
        Ok(text) => {
            metrics::record_request(route, "POST", "ok", start);
            text
        }
        Err(e) => {
            let outcome = match e {
                SubmissionError::Rejected(_) | SubmissionError::Form(_) => "invalid_input",
                SubmissionError::Chain(_) => "chain_error",
            };
            tracing::warn!(route, error = %e, "Form submission failed");
            metrics::record_request(route, "POST", outcome, start);
            error_text(&e)
        }
    }
}
