//! Route handlers.
//!
//! GET on a form route only renders the form. POST parses the form, makes
//! exactly one contract call, and answers with text.

use alloy::primitives::Address;
use axum::{
    extract::{rejection::FormRejection, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse},
    Form, Json,
};
use serde::Serialize;
use std::time::Instant;

use crate::contract::ProductRegistry;
use crate::http::forms::{ProductIdForm, RegisterForm, TransferForm};
use crate::http::pages;
use crate::http::response::{self, respond, SubmissionError};
use crate::http::server::AppState;
use crate::observability::metrics;

type FormInput<T> = Result<Form<T>, FormRejection>;

pub async fn connect_page() -> Html<&'static str> {
    Html(pages::CONNECT)
}

pub async fn welcome_page() -> Html<&'static str> {
    Html(pages::WELCOME)
}

pub async fn register_page() -> Html<&'static str> {
    Html(pages::REGISTER)
}

pub async fn transfer_page() -> Html<&'static str> {
    Html(pages::TRANSFER)
}

pub async fn deliver_page() -> Html<&'static str> {
    Html(pages::DELIVER)
}

pub async fn product_page() -> Html<&'static str> {
    Html(pages::PRODUCT)
}

pub async fn history_page() -> Html<&'static str> {
    Html(pages::HISTORY)
}

pub async fn stylesheet() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css; charset=utf-8")], pages::STYLESHEET)
}

/// POST `/register`.
pub async fn register_product(State(state): State<AppState>, form: FormInput<RegisterForm>) -> String {
    let start = Instant::now();
    let result = submit_registration(state.registry.as_ref(), form).await;
    respond("/register", start, result)
}

async fn submit_registration(
    registry: &dyn ProductRegistry,
    form: FormInput<RegisterForm>,
) -> Result<String, SubmissionError> {
    let Form(form) = form?;
    let registration = form.parse()?;
    registry
        .register_product(&registration.name, &registration.manufacturer)
        .await?;
    Ok(response::registered(&registration))
}

/// POST `/transfer`.
pub async fn transfer_ownership(State(state): State<AppState>, form: FormInput<TransferForm>) -> String {
    let start = Instant::now();
    let result = submit_transfer(state.registry.as_ref(), form).await;
    respond("/transfer", start, result)
}

async fn submit_transfer(
    registry: &dyn ProductRegistry,
    form: FormInput<TransferForm>,
) -> Result<String, SubmissionError> {
    let Form(form) = form?;
    let transfer = form.parse()?;
    registry
        .transfer_ownership(transfer.product_id, transfer.new_owner)
        .await?;
    Ok(response::transferred(&transfer))
}

/// POST `/deliver`.
pub async fn mark_as_delivered(State(state): State<AppState>, form: FormInput<ProductIdForm>) -> String {
    let start = Instant::now();
    let result = submit_delivery(state.registry.as_ref(), form).await;
    respond("/deliver", start, result)
}

async fn submit_delivery(
    registry: &dyn ProductRegistry,
    form: FormInput<ProductIdForm>,
) -> Result<String, SubmissionError> {
    let Form(form) = form?;
    let product_id = form.parse()?;
    registry.mark_as_delivered(product_id).await?;
    Ok(response::delivered(product_id))
}

/// POST `/product`.
pub async fn get_product_details(State(state): State<AppState>, form: FormInput<ProductIdForm>) -> String {
    let start = Instant::now();
    let result = query_product(state.registry.as_ref(), form).await;
    respond("/product", start, result)
}

async fn query_product(
    registry: &dyn ProductRegistry,
    form: FormInput<ProductIdForm>,
) -> Result<String, SubmissionError> {
    let Form(form) = form?;
    let product = registry.get_product(form.parse()?).await?;
    Ok(response::product_details(&product))
}

/// POST `/history`.
pub async fn get_ownership_history(State(state): State<AppState>, form: FormInput<ProductIdForm>) -> String {
    let start = Instant::now();
    let result = query_history(state.registry.as_ref(), form).await;
    respond("/history", start, result)
}

async fn query_history(
    registry: &dyn ProductRegistry,
    form: FormInput<ProductIdForm>,
) -> Result<String, SubmissionError> {
    let Form(form) = form?;
    let history = registry.get_ownership_history(form.parse()?).await?;
    Ok(response::ownership_history(&history))
}

/// Body of `/health`.
#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub contract: Address,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chain_id: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub block_number: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sender: Option<Address>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// GET `/health`: 200 when the node answers, 503 otherwise.
pub async fn health(State(state): State<AppState>) -> (StatusCode, Json<HealthReport>) {
    let contract = state.registry.contract_address();
    match state.registry.chain_status().await {
        Ok(status) => {
            metrics::record_chain_health(true);
            (
                StatusCode::OK,
                Json(HealthReport {
                    status: "ok",
                    contract,
                    chain_id: Some(status.chain_id.0),
                    block_number: Some(status.block_number),
                    sender: status.sender,
                    error: None,
                }),
            )
        }
        Err(e) => {
            metrics::record_chain_health(false);
            tracing::warn!(error = %e, "Health check failed");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(HealthReport {
                    status: "degraded",
                    contract,
                    chain_id: None,
                    block_number: None,
                    sender: None,
                    error: Some(e.to_string()),
                }),
            )
        }
    }
}
