use crate::payments::error::{GatewayError, GatewayResult};

/// Merchant identity and gateway endpoints shared by the account and payment
/// services. Built once at startup and never mutated.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionConfig {
    pub merchant_ccid: String,
    pub merchant_password: String,
    /// e.g. `https://api.veritrans.co.jp:443/paynowid/v1`
    pub account_api_url: String,
    /// e.g. `https://api.veritrans.co.jp:443/paynow/v2`
    pub payment_api_url: String,
    pub search_api_url: String,
    /// Protocol version, `2.0.0` at the time of writing.
    pub txn_version: String,
    /// `"1"` for dummy (test) transactions, `"0"` for live ones.
    pub dummy_request: String,
}

impl ConnectionConfig {
    pub fn from_env() -> GatewayResult<Self> {
        let config = Self {
            merchant_ccid: required_var("MERCHANT_CCID")?,
            merchant_password: required_var("MERCHANT_PASSWORD")?,
            account_api_url: required_var("ACCOUNT_API_URL")?,
            payment_api_url: required_var("PAYMENT_API_URL")?,
            search_api_url: std::env::var("SEARCH_API_URL").unwrap_or_default(),
            txn_version: required_var("TXN_VERSION")?,
            dummy_request: required_var("DUMMY_REQUEST")?,
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.merchant_ccid.trim().is_empty() || self.merchant_password.is_empty() {
            return Err(GatewayError::configuration(
                "merchant id and password are required",
            ));
        }
        if !matches!(self.dummy_request.as_str(), "0" | "1") {
            return Err(GatewayError::configuration(format!(
                "DUMMY_REQUEST must be 0 or 1, got {:?}",
                self.dummy_request
            )));
        }
        Ok(())
    }

    pub fn is_dummy(&self) -> bool {
        self.dummy_request == "1"
    }
}

/// Credentials of the card tokenization API. Unrelated to the merchant hash
/// scheme used by [`ConnectionConfig`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenConfig {
    pub api_url: String,
    pub api_token: String,
}

impl TokenConfig {
    pub fn from_env() -> Self {
        Self {
            api_url: std::env::var("MDK_API_URL").unwrap_or_default(),
            api_token: std::env::var("MDK_API_TOKEN").unwrap_or_default(),
        }
    }

    pub fn is_configured(&self) -> bool {
        !self.api_url.trim().is_empty() && !self.api_token.is_empty()
    }
}

fn required_var(name: &str) -> GatewayResult<String> {
    std::env::var(name)
        .ok()
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| {
            GatewayError::configuration(format!("{} environment variable is required", name))
        })
}
