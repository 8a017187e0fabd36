use crate::payments::error::GatewayError;
use chrono::{Months, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

pub const STATUS_SUCCESS: &str = "success";

/// Account management operation, addressed as the first path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountMode {
    Add,
    Update,
    Delete,
    Restore,
    Get,
}

impl AccountMode {
    pub const ALL: [AccountMode; 5] = [
        AccountMode::Add,
        AccountMode::Update,
        AccountMode::Delete,
        AccountMode::Restore,
        AccountMode::Get,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            AccountMode::Add => "Add",
            AccountMode::Update => "Update",
            AccountMode::Delete => "Delete",
            AccountMode::Restore => "Restore",
            AccountMode::Get => "Get",
        }
    }
}

impl std::fmt::Display for AccountMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AccountResource {
    Account,
    CardInfo,
}

impl AccountResource {
    pub const fn as_str(&self) -> &'static str {
        match self {
            AccountResource::Account => "account",
            AccountResource::CardInfo => "cardinfo",
        }
    }
}

impl std::fmt::Display for AccountResource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMode {
    Authorize,
    Capture,
    Cancel,
    Search,
}

impl PaymentMode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentMode::Authorize => "Authorize",
            PaymentMode::Capture => "Capture",
            PaymentMode::Cancel => "Cancel",
            PaymentMode::Search => "Search",
        }
    }
}

impl std::fmt::Display for PaymentMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment method served by the gateway. `Search` is not a method; it only
/// exists to build the `Search/search` route.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentServiceType {
    Card,
    Mpi,
    Cvs,
    Em,
    Bank,
    Upop,
    Paypal,
    Saison,
    Alipay,
    Carrier,
    Search,
}

impl PaymentServiceType {
    pub const ALL: [PaymentServiceType; 11] = [
        PaymentServiceType::Card,
        PaymentServiceType::Mpi,
        PaymentServiceType::Cvs,
        PaymentServiceType::Em,
        PaymentServiceType::Bank,
        PaymentServiceType::Upop,
        PaymentServiceType::Paypal,
        PaymentServiceType::Saison,
        PaymentServiceType::Alipay,
        PaymentServiceType::Carrier,
        PaymentServiceType::Search,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            PaymentServiceType::Card => "card",
            PaymentServiceType::Mpi => "mpi",
            PaymentServiceType::Cvs => "cvs",
            PaymentServiceType::Em => "em",
            PaymentServiceType::Bank => "bank",
            PaymentServiceType::Upop => "upop",
            PaymentServiceType::Paypal => "paypal",
            PaymentServiceType::Saison => "saison",
            PaymentServiceType::Alipay => "alipay",
            PaymentServiceType::Carrier => "carrier",
            PaymentServiceType::Search => "search",
        }
    }
}

impl std::fmt::Display for PaymentServiceType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for PaymentServiceType {
    type Err = GatewayError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_lowercase();
        PaymentServiceType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str() == normalized)
            .ok_or_else(|| {
                GatewayError::validation(
                    format!("unsupported payment service type: {}", value),
                    "service_type",
                )
            })
    }
}

// Request side. Field declaration order is the canonical serialization order
// and therefore part of the signature.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountBasicParam {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub create_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub delete_date: String,
    pub force_delete_date: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardParam {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub card_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_card: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub default_card_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub card_number: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub card_expire: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RecurringChargeParam {
    pub group_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub start_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub end_date: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub final_charge: String,
    pub one_time_amount: String,
    pub amount: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct AccountParam {
    pub account_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_basic_param: Option<AccountBasicParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card_param: Option<CardParam>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recurring_charge_param: Option<RecurringChargeParam>,
}

impl AccountParam {
    pub fn new(account_id: impl Into<String>) -> Self {
        Self {
            account_id: account_id.into(),
            ..Default::default()
        }
    }

    pub fn with_card(mut self, card: CardParam) -> Self {
        self.card_param = Some(card);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PayNowIdParam {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_param: Option<AccountParam>,
    #[serde(rename = "memo1", skip_serializing_if = "String::is_empty")]
    pub memo: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub free_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderParam {
    pub order_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchParam {
    pub common: OrderParam,
}

impl SearchParam {
    pub fn order(order_id: impl Into<String>) -> Self {
        Self {
            common: OrderParam {
                order_id: order_id.into(),
            },
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Params {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub order_id: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub amount: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub jpo: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub with_capture: String,
    #[serde(rename = "payNowIdParam", skip_serializing_if = "Option::is_none")]
    pub pay_now_id_param: Option<PayNowIdParam>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub contain_dummy_flag: String,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub service_type_cd: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub newer_flag: String,
    #[serde(rename = "searchParameters", skip_serializing_if = "Option::is_none")]
    pub search_param: Option<SearchParam>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub txn_version: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub dummy_request: String,
    #[serde(rename = "merchantCcid", skip_serializing_if = "String::is_empty")]
    pub merchant_ccid: String,
}

impl Params {
    /// Search parameters that look up one exact order id, dummy transactions
    /// included, newest transaction only.
    pub fn order_search(order_id: impl Into<String>, service_types: &[PaymentServiceType]) -> Self {
        Self {
            contain_dummy_flag: "1".to_string(),
            service_type_cd: service_types.iter().map(|t| t.as_str().to_string()).collect(),
            newer_flag: "true".to_string(),
            search_param: Some(SearchParam::order(order_id)),
            ..Default::default()
        }
    }
}

/// Signed request envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionParam {
    pub params: Params,
    pub auth_hash: String,
}

// Response side. The gateway omits fields freely, so everything defaults.

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ProperTransactionInfo {
    pub card_transaction_type: String,
    pub req_with_capture: String,
    #[serde(rename = "reqJpoInformation")]
    pub req_jpo_information: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionInfo {
    pub amount: String,
    pub command: String,
    pub mstatus: String,
    #[serde(rename = "properTransactionInfo")]
    pub proper_info: ProperTransactionInfo,
    #[serde(rename = "txnDatetime")]
    pub txn_date_time: String,
    pub txn_id: String,
    pub v_result_code: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TransactionInfos {
    pub transaction_info: Vec<TransactionInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInfo {
    pub account_id: String,
    pub index: i64,
    pub order_id: String,
    pub service_type_cd: String,
    pub last_success_txn_type: String,
    pub transaction_infos: Option<TransactionInfos>,
}

impl OrderInfo {
    pub fn transactions(&self) -> &[TransactionInfo] {
        self.transaction_infos
            .as_ref()
            .map(|t| t.transaction_info.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct OrderInfos {
    pub order_info: Vec<OrderInfo>,
}

/// The `result` block every gateway response carries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct TxnResult {
    pub v_result_code: String,
    pub mstatus: String,
    #[serde(rename = "merrMsg")]
    pub merr_msg: String,
    pub order_infos: Option<OrderInfos>,
}

impl TxnResult {
    pub fn is_success(&self) -> bool {
        self.mstatus == STATUS_SUCCESS
    }

    pub fn orders(&self) -> &[OrderInfo] {
        self.order_infos
            .as_ref()
            .map(|o| o.order_info.as_slice())
            .unwrap_or(&[])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct CardInfo {
    pub card_expire: String,
    pub card_id: String,
    pub card_number: String,
    pub default_card: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Account {
    pub account_id: String,
    pub card_info: Vec<CardInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PayNowIdResponse {
    pub account: Account,
    pub message: String,
    pub status: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ConnectionResponse {
    #[serde(rename = "payNowIdResponse")]
    pub pay_now_id_response: Option<PayNowIdResponse>,
    pub result: TxnResult,
}

/// Masks a card number the way the gateway stores it: first six and last two
/// digits visible. Numbers too short to keep both ends are masked entirely.
pub fn mask_card_number(number: &str) -> String {
    let digits: Vec<char> = number.chars().collect();
    if digits.len() <= 8 {
        return "*".repeat(digits.len());
    }
    let mut masked = String::with_capacity(digits.len());
    masked.extend(&digits[..6]);
    masked.push_str(&"*".repeat(digits.len() - 8));
    masked.extend(&digits[digits.len() - 2..]);
    masked
}

/// `MM/YY` card expiry `months` after `from`.
pub fn expiry_from(from: NaiveDate, months: u32) -> String {
    from.checked_add_months(Months::new(months))
        .unwrap_or(from)
        .format("%m/%y")
        .to_string()
}

pub fn expiry_after_months(months: u32) -> String {
    expiry_from(Utc::now().date_naive(), months)
}
