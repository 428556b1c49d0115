//! Form payloads and their conversion into call arguments.
//!
//! Fields arrive as optional strings so that a missing or malformed field
//! is reported inline like any other failure instead of being rejected by
//! the extractor.

use alloy::primitives::{Address, U256};
use serde::Deserialize;
use thiserror::Error;

/// Errors turning submitted form values into call arguments.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum FormError {
    #[error("missing form field '{0}'")]
    Missing(&'static str),

    #[error("invalid literal for product id: '{0}'")]
    InvalidProductId(String),

    #[error("'{0}' is not a valid address")]
    InvalidAddress(String),
}

/// `/register` form.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    pub name: Option<String>,
    pub manufacturer: Option<String>,
}

/// Validated `/register` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    pub name: String,
    pub manufacturer: String,
}

impl RegisterForm {
    /// Names are forwarded unchanged; the contract owns their validation.
    pub fn parse(self) -> Result<Registration, FormError> {
        Ok(Registration {
            name: self.name.ok_or(FormError::Missing("name"))?,
            manufacturer: self.manufacturer.ok_or(FormError::Missing("manufacturer"))?,
        })
    }
}

/// `/transfer` form.
#[derive(Debug, Default, Deserialize)]
pub struct TransferForm {
    pub product_id: Option<String>,
    pub new_owner: Option<String>,
}

/// Validated `/transfer` arguments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transfer {
    pub product_id: U256,
    pub new_owner: Address,
    /// The address as submitted, echoed back in the response.
    pub new_owner_input: String,
}

impl TransferForm {
    pub fn parse(self) -> Result<Transfer, FormError> {
        let product_id = parse_product_id(self.product_id.as_deref())?;
        let input = self.new_owner.ok_or(FormError::Missing("new_owner"))?;
        let new_owner = input
            .trim()
            .parse::<Address>()
            .map_err(|_| FormError::InvalidAddress(input.clone()))?;
        Ok(Transfer {
            product_id,
            new_owner,
            new_owner_input: input,
        })
    }
}

/// Form carrying only a product id (`/deliver`, `/product`, `/history`).
#[derive(Debug, Default, Deserialize)]
pub struct ProductIdForm {
    pub product_id: Option<String>,
}

impl ProductIdForm {
    pub fn parse(self) -> Result<U256, FormError> {
        parse_product_id(self.product_id.as_deref())
    }
}

/// Parse a base-10 product id that fits in a uint256.
fn parse_product_id(raw: Option<&str>) -> Result<U256, FormError> {
    let raw = raw.ok_or(FormError::Missing("product_id"))?;
    let digits = raw.trim();
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return Err(FormError::InvalidProductId(raw.to_string()));
    }
    U256::from_str_radix(digits, 10).map_err(|_| FormError::InvalidProductId(raw.to_string()))
}
