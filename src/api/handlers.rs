use crate::api::{status_of, AccountResponse, GatewayState, PaymentResponse, TokenResponse};
use crate::payments::error::GatewayResult;
use crate::payments::token::ClientCardInfo;
use crate::payments::types::{Account, AccountParam, Params, PaymentServiceType, TxnResult};
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use std::str::FromStr;

type Reply<T> = (StatusCode, Json<T>);

fn account_reply(result: GatewayResult<Account>) -> Reply<AccountResponse> {
    match result {
        Ok(account) => (
            StatusCode::OK,
            Json(AccountResponse {
                account: Some(account),
                err: String::new(),
            }),
        ),
        Err(e) => (
            status_of(&e),
            Json(AccountResponse {
                account: None,
                err: e.to_string(),
            }),
        ),
    }
}

fn payment_reply(result: GatewayResult<TxnResult>) -> Reply<PaymentResponse> {
    match result {
        Ok(result) => (
            StatusCode::OK,
            Json(PaymentResponse {
                result: Some(result),
                err: String::new(),
            }),
        ),
        Err(e) => (
            status_of(&e),
            Json(PaymentResponse {
                result: None,
                err: e.to_string(),
            }),
        ),
    }
}

pub async fn health() -> &'static str {
    "ok"
}

pub async fn get_card_token(
    State(state): State<GatewayState>,
    Json(card): Json<ClientCardInfo>,
) -> Reply<TokenResponse> {
    match state.service.get_card_token(card).await {
        Ok(token) => (
            StatusCode::OK,
            Json(TokenResponse {
                token,
                err: String::new(),
            }),
        ),
        Err(e) => (
            status_of(&e),
            Json(TokenResponse {
                token: String::new(),
                err: e.to_string(),
            }),
        ),
    }
}

pub async fn create_account(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.create_account(account).await)
}

pub async fn update_account(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.update_account(account).await)
}

pub async fn delete_account(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.delete_account(account).await)
}

pub async fn restore_account(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.restore_account(account).await)
}

pub async fn get_account(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.get_account(account).await)
}

pub async fn create_card(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.create_card(account).await)
}

pub async fn update_card(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.update_card(account).await)
}

pub async fn delete_card(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.delete_card(account).await)
}

pub async fn restore_card(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.restore_card(account).await)
}

pub async fn get_card(
    State(state): State<GatewayState>,
    Json(account): Json<AccountParam>,
) -> Reply<AccountResponse> {
    account_reply(state.service.get_card(account).await)
}

pub async fn authorize_card(
    State(state): State<GatewayState>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    payment_reply(
        state
            .service
            .authorize(params, PaymentServiceType::Card)
            .await,
    )
}

pub async fn capture_card(
    State(state): State<GatewayState>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    payment_reply(state.service.capture(params, PaymentServiceType::Card).await)
}

pub async fn cancel_card(
    State(state): State<GatewayState>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    payment_reply(state.service.cancel(params, PaymentServiceType::Card).await)
}

pub async fn authorize(
    State(state): State<GatewayState>,
    Path(service_type): Path<String>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    match PaymentServiceType::from_str(&service_type) {
        Ok(service_type) => payment_reply(state.service.authorize(params, service_type).await),
        Err(e) => payment_reply(Err(e)),
    }
}

pub async fn capture(
    State(state): State<GatewayState>,
    Path(service_type): Path<String>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    match PaymentServiceType::from_str(&service_type) {
        Ok(service_type) => payment_reply(state.service.capture(params, service_type).await),
        Err(e) => payment_reply(Err(e)),
    }
}

pub async fn cancel(
    State(state): State<GatewayState>,
    Path(service_type): Path<String>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    match PaymentServiceType::from_str(&service_type) {
        Ok(service_type) => payment_reply(state.service.cancel(params, service_type).await),
        Err(e) => payment_reply(Err(e)),
    }
}

pub async fn search(
    State(state): State<GatewayState>,
    Json(params): Json<Params>,
) -> Reply<PaymentResponse> {
    payment_reply(state.service.search(params).await)
}
