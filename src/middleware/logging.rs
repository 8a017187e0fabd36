//! Call logging around a [`GatewayService`].
//!
//! Card numbers are masked and security codes dropped before anything is
//! written to the log.

use crate::payments::error::GatewayResult;
use crate::payments::service::GatewayService;
use crate::payments::token::ClientCardInfo;
use crate::payments::types::{
    mask_card_number, Account, AccountParam, Params, PaymentServiceType, TxnResult,
};
use async_trait::async_trait;
use serde::Serialize;
use std::future::Future;
use std::time::Instant;
use tracing::{info, warn};

const REDACTED: &str = "***";

pub struct LoggingMiddleware<S> {
    next: S,
}

impl<S: GatewayService> LoggingMiddleware<S> {
    pub fn new(next: S) -> Self {
        Self { next }
    }

    pub fn inner(&self) -> &S {
        &self.next
    }
}

fn to_json<T: Serialize>(value: &T) -> String {
    serde_json::to_string(value).unwrap_or_else(|e| format!("<unserializable: {}>", e))
}

pub fn redact_card_info(card: &ClientCardInfo) -> ClientCardInfo {
    ClientCardInfo {
        card_number: mask_card_number(&card.card_number),
        security_code: REDACTED.to_string(),
        ..card.clone()
    }
}

pub fn redact_account_param(account: &AccountParam) -> AccountParam {
    let mut account = account.clone();
    if let Some(card) = account.card_param.as_mut() {
        if !card.card_number.is_empty() {
            card.card_number = mask_card_number(&card.card_number);
        }
        if !card.token.is_empty() {
            card.token = REDACTED.to_string();
        }
    }
    account
}

pub fn redact_params(params: &Params) -> Params {
    let mut params = params.clone();
    if let Some(pay_now) = params.pay_now_id_param.as_mut() {
        if !pay_now.token.is_empty() {
            pay_now.token = REDACTED.to_string();
        }
        if let Some(account) = pay_now.account_param.as_ref() {
            pay_now.account_param = Some(redact_account_param(account));
        }
    }
    params
}

fn params_input(params: &Params) -> String {
    to_json(&redact_params(params))
}

async fn observe<T, F>(method: &'static str, input: String, call: F) -> GatewayResult<T>
where
    F: Future<Output = GatewayResult<T>>,
{
    let begin = Instant::now();
    let result = call.await;
    let took_ms = begin.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => info!(method, input = %input, took_ms, "gateway call"),
        Err(e) => warn!(method, input = %input, error = %e, took_ms, "gateway call failed"),
    }
    result
}

#[async_trait]
impl<S: GatewayService> GatewayService for LoggingMiddleware<S> {
    async fn get_card_token(&self, card: ClientCardInfo) -> GatewayResult<String> {
        let input = to_json(&redact_card_info(&card));
        observe("GetCardToken", input, self.next.get_card_token(card)).await
    }

    async fn create_account(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("CreateAccount", input, self.next.create_account(account)).await
    }

    async fn update_account(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("UpdateAccount", input, self.next.update_account(account)).await
    }

    async fn delete_account(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("DeleteAccount", input, self.next.delete_account(account)).await
    }

    async fn restore_account(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("RestoreAccount", input, self.next.restore_account(account)).await
    }

    async fn get_account(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("GetAccount", input, self.next.get_account(account)).await
    }

    async fn create_card(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("CreateCard", input, self.next.create_card(account)).await
    }

    async fn update_card(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("UpdateCard", input, self.next.update_card(account)).await
    }

    async fn delete_card(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("DeleteCard", input, self.next.delete_card(account)).await
    }

    async fn restore_card(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("RestoreCard", input, self.next.restore_card(account)).await
    }

    async fn get_card(&self, account: AccountParam) -> GatewayResult<Account> {
        let input = to_json(&redact_account_param(&account));
        observe("GetCard", input, self.next.get_card(account)).await
    }

    async fn authorize(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        let input = params_input(&params);
        observe("Authorize", input, self.next.authorize(params, service_type)).await
    }

    async fn capture(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        let input = params_input(&params);
        observe("Capture", input, self.next.capture(params, service_type)).await
    }

    async fn cancel(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        let input = params_input(&params);
        observe("Cancel", input, self.next.cancel(params, service_type)).await
    }

    async fn search(&self, params: Params) -> GatewayResult<TxnResult> {
        let input = params_input(&params);
        observe("Search", input, self.next.search(params)).await
    }
}
