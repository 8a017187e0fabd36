//! JSON-over-HTTP surface of the gateway facade.

pub mod handlers;

use crate::payments::error::GatewayError;
use crate::payments::service::GatewayService;
use crate::payments::types::{Account, TxnResult};
use axum::{
    http::StatusCode,
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Clone)]
pub struct GatewayState {
    pub service: Arc<dyn GatewayService>,
}

impl GatewayState {
    pub fn new(service: Arc<dyn GatewayService>) -> Self {
        Self { service }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TokenResponse {
    pub token: String,
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub err: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AccountResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub account: Option<Account>,
    #[serde(default)]
    pub err: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PaymentResponse {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<TxnResult>,
    #[serde(default)]
    pub err: String,
}

pub fn status_of(err: &GatewayError) -> StatusCode {
    StatusCode::from_u16(err.http_status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
}

pub fn router(state: GatewayState) -> Router {
    Router::new()
        .route("/health", get(handlers::health))
        .route("/mdk/token", post(handlers::get_card_token))
        .route("/account/create", post(handlers::create_account))
        .route("/account/update", post(handlers::update_account))
        .route("/account/delete", post(handlers::delete_account))
        .route("/account/restore", post(handlers::restore_account))
        .route("/account/get", post(handlers::get_account))
        .route("/card/create", post(handlers::create_card))
        .route("/card/update", post(handlers::update_card))
        .route("/card/delete", post(handlers::delete_card))
        .route("/card/restore", post(handlers::restore_card))
        .route("/card/get", post(handlers::get_card))
        .route("/authorize", post(handlers::authorize_card))
        .route("/capture", post(handlers::capture_card))
        .route("/cancel", post(handlers::cancel_card))
        .route("/authorize/{service_type}", post(handlers::authorize))
        .route("/capture/{service_type}", post(handlers::capture))
        .route("/cancel/{service_type}", post(handlers::cancel))
        .route("/search", post(handlers::search))
        .with_state(state)
}
