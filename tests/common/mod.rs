//! In-memory stand-in for the PayNowID, payment and search APIs.
#![allow(dead_code)]

use serde_json::{json, Value};
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use veritrans_gateway::payments::config::ConnectionConfig;
use veritrans_gateway::payments::types::{mask_card_number, CardParam};
use veritrans_gateway::payments::{AccountService, GatewayHttpClient, PaymentService};
use wiremock::matchers::method;
use wiremock::{Mock, MockServer, Request, Respond, ResponseTemplate};

pub const MERCHANT_CCID: &str = "TEST_MERCHANT_0001";
pub const MERCHANT_PASSWORD: &str = "test-merchant-password";

pub const NOT_REGISTERED: &str = "未登録の会員です。";
pub const ALREADY_REGISTERED: &str = "入会中の会員です。";
pub const UNKNOWN_CARD: &str = "指定されたカードは登録されていません。";
pub const DUPLICATE_ORDER: &str = "オーダーIDが既に使用されています。";
pub const UNKNOWN_ORDER: &str = "指定された取引が存在しません。";
pub const AUTH_FAILED: &str = "認証に失敗しました。";

pub const TEST_CARD_NUMBER: &str = "4111111111111111";

#[derive(Debug, Default)]
struct FakeAccount {
    deleted: bool,
    cards: Vec<Value>,
}

#[derive(Debug, Clone)]
struct FakeTxn {
    command: String,
    amount: String,
    with_capture: String,
    txn_id: String,
}

#[derive(Debug, Default)]
struct State {
    accounts: HashMap<String, FakeAccount>,
    orders: HashMap<String, Vec<FakeTxn>>,
    next_id: u64,
}

/// Stateful gateway double. Mounted on a [`MockServer`], it verifies the
/// request signature and then answers the way the live gateway does.
#[derive(Clone, Default)]
pub struct FakeGateway {
    state: Arc<Mutex<State>>,
}

impl FakeGateway {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers an authorized order, as if an earlier test run had used it.
    pub fn seed_order(&self, order_id: &str) {
        let mut state = self.lock();
        state.next_id += 1;
        let txn = FakeTxn {
            command: "Authorize".to_string(),
            amount: "100".to_string(),
            with_capture: "false".to_string(),
            txn_id: format!("TXN{:06}", state.next_id),
        };
        state.orders.insert(order_id.to_string(), vec![txn]);
    }

    pub fn order_count(&self) -> usize {
        self.lock().orders.len()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, State> {
        match self.state.lock() {
            Ok(guard) => guard,
            Err(poisoned) => poisoned.into_inner(),
        }
    }
}

impl Respond for FakeGateway {
    fn respond(&self, request: &Request) -> ResponseTemplate {
        let params = match signed_params(&request.body) {
            Ok(params) => params,
            Err(_) => return failure(AUTH_FAILED),
        };

        let segments: Vec<&str> = request.url.path().rsplit('/').take(2).collect();
        if segments.len() < 2 {
            return ResponseTemplate::new(404);
        }
        let (mode, target) = (segments[1], segments[0]);

        let mut state = self.lock();
        match target {
            "account" => state.account(mode, &params),
            "cardinfo" => state.card(mode, &params),
            "search" => state.search(&params),
            _ => state.payment(mode, &params),
        }
    }
}

impl State {
    fn account(&mut self, mode: &str, params: &Value) -> ResponseTemplate {
        let account_param = &params["payNowIdParam"]["accountParam"];
        let id = str_field(account_param, "accountId");

        match mode {
            "Add" => {
                if self.accounts.get(&id).is_some_and(|a| !a.deleted) {
                    return failure(ALREADY_REGISTERED);
                }
                self.accounts.insert(id.clone(), FakeAccount::default());
                account_ok(&id, Vec::new())
            }
            "Get" | "Update" => match self.accounts.get(&id).filter(|a| !a.deleted) {
                Some(account) => account_ok(&id, account.cards.clone()),
                None => failure(NOT_REGISTERED),
            },
            "Delete" => match self.accounts.get_mut(&id).filter(|a| !a.deleted) {
                Some(account) => {
                    account.deleted = true;
                    account_ok(&id, Vec::new())
                }
                None => failure(NOT_REGISTERED),
            },
            "Restore" => match self.accounts.get_mut(&id).filter(|a| a.deleted) {
                Some(account) => {
                    account.deleted = false;
                    account_ok(&id, account.cards.clone())
                }
                None => failure(NOT_REGISTERED),
            },
            _ => ResponseTemplate::new(404),
        }
    }

    fn card(&mut self, mode: &str, params: &Value) -> ResponseTemplate {
        let account_param = &params["payNowIdParam"]["accountParam"];
        let id = str_field(account_param, "accountId");
        let card_param = &account_param["cardParam"];

        let next_id = self.next_id + 1;
        let Some(account) = self.accounts.get_mut(&id).filter(|a| !a.deleted) else {
            return failure(NOT_REGISTERED);
        };

        match mode {
            "Add" => {
                self.next_id = next_id;
                let number = match str_field(card_param, "cardNumber") {
                    n if n.is_empty() => TEST_CARD_NUMBER.to_string(),
                    n => n,
                };
                let default_card = match str_field(card_param, "defaultCard") {
                    d if !d.is_empty() => d,
                    _ if account.cards.is_empty() => "1".to_string(),
                    _ => "0".to_string(),
                };
                if default_card == "1" {
                    for other in account.cards.iter_mut() {
                        other["defaultCard"] = json!("0");
                    }
                }
                let card = json!({
                    "cardExpire": str_field(card_param, "cardExpire"),
                    "cardId": format!("CARD{:04}", next_id),
                    "cardNumber": mask_card_number(&number),
                    "defaultCard": default_card,
                });
                account.cards.push(card.clone());
                account_ok(&id, vec![card])
            }
            "Get" | "Restore" => account_ok(&id, account.cards.clone()),
            "Update" | "Delete" => {
                let card_id = str_field(card_param, "cardId");
                let position = account
                    .cards
                    .iter()
                    .position(|c| c["cardId"] == card_id.as_str());
                let Some(index) = position else {
                    return failure(UNKNOWN_CARD);
                };
                if mode == "Delete" {
                    account.cards.remove(index);
                } else {
                    let expire = str_field(card_param, "cardExpire");
                    if !expire.is_empty() {
                        account.cards[index]["cardExpire"] = json!(expire);
                    }
                }
                account_ok(&id, account.cards.clone())
            }
            _ => ResponseTemplate::new(404),
        }
    }

    fn payment(&mut self, mode: &str, params: &Value) -> ResponseTemplate {
        let order_id = str_field(params, "orderId");
        self.next_id += 1;
        let txn = FakeTxn {
            command: mode.to_string(),
            amount: str_field(params, "amount"),
            with_capture: str_field(params, "withCapture"),
            txn_id: format!("TXN{:06}", self.next_id),
        };

        match mode {
            "Authorize" => {
                if self.orders.contains_key(&order_id) {
                    return failure(DUPLICATE_ORDER);
                }
                self.orders.insert(order_id, vec![txn]);
            }
            "Capture" | "Cancel" => match self.orders.get_mut(&order_id) {
                Some(txns) => txns.push(txn),
                None => return failure(UNKNOWN_ORDER),
            },
            _ => return ResponseTemplate::new(404),
        }

        ResponseTemplate::new(200).set_body_json(json!({ "result": ok_result() }))
    }

    fn search(&self, params: &Value) -> ResponseTemplate {
        let order_id = str_field(&params["searchParameters"]["common"], "orderId");
        let newer_only = str_field(params, "newerFlag") == "true";

        let order_info: Vec<Value> = match self.orders.get(&order_id) {
            Some(txns) if !txns.is_empty() => {
                let shown = if newer_only {
                    &txns[txns.len() - 1..]
                } else {
                    &txns[..]
                };
                let last = txns.last().map(|t| t.command.clone()).unwrap_or_default();
                vec![json!({
                    "accountId": "",
                    "index": 0,
                    "orderId": order_id,
                    "serviceTypeCd": "card",
                    "lastSuccessTxnType": last,
                    "transactionInfos": {
                        "transactionInfo": shown.iter().map(txn_json).collect::<Vec<_>>(),
                    },
                })]
            }
            _ => Vec::new(),
        };

        let mut result = ok_result();
        result["orderInfos"] = json!({ "orderInfo": order_info });
        ResponseTemplate::new(200).set_body_json(json!({ "result": result }))
    }
}

/// Checks the envelope the way the gateway does: the hash must cover the
/// exact bytes of `params` as sent.
fn signed_params(body: &[u8]) -> Result<Value, &'static str> {
    let text = std::str::from_utf8(body).map_err(|_| "body is not utf-8")?;
    let raw = text
        .strip_prefix("{\"params\":")
        .ok_or("params must come first")?;
    let split = raw.rfind(",\"authHash\":\"").ok_or("missing authHash")?;
    let (raw_params, rest) = raw.split_at(split);
    let hash = rest
        .strip_prefix(",\"authHash\":\"")
        .and_then(|h| h.strip_suffix("\"}"))
        .ok_or("malformed envelope")?;

    if hash.len() != 64 || !hash.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err("malformed authHash");
    }
    let expected = hex::encode(Sha256::digest(
        format!("{}{}{}", MERCHANT_CCID, raw_params, MERCHANT_PASSWORD).as_bytes(),
    ));
    if expected != hash {
        return Err("authHash mismatch");
    }
    serde_json::from_str(raw_params).map_err(|_| "params are not json")
}

fn str_field(value: &Value, key: &str) -> String {
    value[key].as_str().unwrap_or_default().to_string()
}

fn ok_result() -> Value {
    json!({
        "vResultCode": "A001000000000000",
        "mstatus": "success",
        "merrMsg": "正常終了",
    })
}

fn failure(message: &str) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "result": {
            "vResultCode": "E001000000000000",
            "mstatus": "failure",
            "merrMsg": message,
        }
    }))
}

fn account_ok(account_id: &str, cards: Vec<Value>) -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({
        "payNowIdResponse": {
            "account": { "accountId": account_id, "cardInfo": cards },
            "message": "",
            "status": "success",
        },
        "result": ok_result(),
    }))
}

fn txn_json(txn: &FakeTxn) -> Value {
    let card_type = if txn.with_capture == "true" { "ax" } else { "a" };
    json!({
        "amount": txn.amount,
        "command": txn.command,
        "mstatus": "success",
        "properTransactionInfo": {
            "cardTransactionType": card_type,
            "reqWithCapture": txn.with_capture,
        },
        "txnDatetime": "2026-01-01 12:00:00",
        "txnId": txn.txn_id,
        "vResultCode": "A001000000000000",
    })
}

/// A gateway server and a separate search server, both backed by one fake.
pub struct TestGateway {
    pub gateway_server: MockServer,
    pub search_server: MockServer,
    pub fake: FakeGateway,
}

impl TestGateway {
    pub async fn start() -> Self {
        let gateway_server = MockServer::start().await;
        let search_server = MockServer::start().await;
        let fake = FakeGateway::new();

        Mock::given(method("POST"))
            .respond_with(fake.clone())
            .mount(&gateway_server)
            .await;
        Mock::given(method("POST"))
            .respond_with(fake.clone())
            .mount(&search_server)
            .await;

        Self {
            gateway_server,
            search_server,
            fake,
        }
    }

    pub fn connection_config(&self) -> ConnectionConfig {
        ConnectionConfig {
            merchant_ccid: MERCHANT_CCID.to_string(),
            merchant_password: MERCHANT_PASSWORD.to_string(),
            account_api_url: format!("{}/paynowid/v1", self.gateway_server.uri()),
            payment_api_url: format!("{}/paynow/v2", self.gateway_server.uri()),
            search_api_url: format!("{}/paynow-search/v2", self.search_server.uri()),
            txn_version: "2.0.0".to_string(),
            dummy_request: "1".to_string(),
        }
    }

    pub fn accounts(&self) -> AccountService {
        AccountService::new(
            Arc::new(self.connection_config()),
            GatewayHttpClient::new().expect("http client"),
        )
    }

    pub fn payments(&self) -> PaymentService {
        PaymentService::new(
            Arc::new(self.connection_config()),
            GatewayHttpClient::new().expect("http client"),
        )
        .expect("payment service")
    }
}

pub fn tokenized_card(token: &str, expire: &str) -> CardParam {
    CardParam {
        token: token.to_string(),
        card_expire: expire.to_string(),
        ..Default::default()
    }
}
