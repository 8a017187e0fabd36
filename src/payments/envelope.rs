//! Outbound envelope construction.
//!
//! The gateway rejects account requests whose `memo1`/`freeKey` are missing and
//! expects `forceDeleteDate`/`finalCharge` to be explicit, so account requests
//! pass through [`WithDefaults`] before they are signed.

use crate::payments::config::ConnectionConfig;
use crate::payments::error::GatewayResult;
use crate::payments::signing::sign;
use crate::payments::types::{
    AccountBasicParam, AccountParam, ConnectionParam, Params, PayNowIdParam, RecurringChargeParam,
};

pub const DEFAULT_MEMO: &str = "memo";
pub const DEFAULT_FREE_KEY: &str = "freekey";
pub const DEFAULT_FORCE_DELETE_DATE: &str = "0";
pub const DEFAULT_FINAL_CHARGE: &str = "0";

pub trait WithDefaults: Sized {
    fn with_defaults(self) -> Self;
}

fn or_default(value: String, default: &str) -> String {
    if value.is_empty() {
        default.to_string()
    } else {
        value
    }
}

impl WithDefaults for AccountBasicParam {
    fn with_defaults(self) -> Self {
        Self {
            force_delete_date: or_default(self.force_delete_date, DEFAULT_FORCE_DELETE_DATE),
            ..self
        }
    }
}

impl WithDefaults for RecurringChargeParam {
    fn with_defaults(self) -> Self {
        Self {
            final_charge: or_default(self.final_charge, DEFAULT_FINAL_CHARGE),
            ..self
        }
    }
}

impl WithDefaults for AccountParam {
    fn with_defaults(self) -> Self {
        Self {
            account_basic_param: self.account_basic_param.map(WithDefaults::with_defaults),
            recurring_charge_param: self.recurring_charge_param.map(WithDefaults::with_defaults),
            ..self
        }
    }
}

impl WithDefaults for PayNowIdParam {
    fn with_defaults(self) -> Self {
        Self {
            account_param: self.account_param.map(WithDefaults::with_defaults),
            memo: or_default(self.memo, DEFAULT_MEMO),
            free_key: or_default(self.free_key, DEFAULT_FREE_KEY),
            ..self
        }
    }
}

/// Wraps an account in the `payNowIdParam` group account requests are sent as,
/// with account defaults filled. Payment params never go through here.
pub fn account_params(account: AccountParam) -> Params {
    let pay_now = PayNowIdParam {
        account_param: Some(account),
        ..Default::default()
    };
    Params {
        pay_now_id_param: Some(pay_now.with_defaults()),
        ..Default::default()
    }
}

/// Injects the connection fields and signs. Everything else is sent as given.
pub fn build(params: Params, config: &ConnectionConfig) -> GatewayResult<ConnectionParam> {
    let params = Params {
        txn_version: config.txn_version.clone(),
        dummy_request: config.dummy_request.clone(),
        merchant_ccid: config.merchant_ccid.clone(),
        ..params
    };
    let auth_hash = sign(&params, &config.merchant_ccid, &config.merchant_password)?;
    Ok(ConnectionParam { params, auth_hash })
}
