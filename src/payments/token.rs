use crate::payments::config::TokenConfig;
use crate::payments::error::{GatewayError, GatewayResult};
use crate::payments::transport::{json_headers, GatewayHttpClient};
use crate::payments::types::STATUS_SUCCESS;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

pub const TOKEN_LANG: &str = "ja";

/// Raw card data as entered by the card holder.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientCardInfo {
    pub card_number: String,
    pub card_expire: String,
    pub security_code: String,
    #[serde(rename = "cardholder_name", skip_serializing_if = "String::is_empty")]
    pub card_holder_name: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct CardTokenRequest<'a> {
    pub card_number: &'a str,
    pub card_expire: &'a str,
    pub security_code: &'a str,
    #[serde(rename = "cardholder_name", skip_serializing_if = "str::is_empty")]
    pub card_holder_name: &'a str,
    pub token_api_key: &'a str,
    pub lang: &'a str,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct CardTokenResponse {
    pub token: String,
    pub token_expire_date: String,
    pub req_card_number: String,
    pub status: String,
    pub code: String,
    pub message: String,
}

/// Exchanges card data for a single-use token. Authenticates with the token
/// API key only; merchant credentials never reach this endpoint.
#[derive(Debug, Clone)]
pub struct TokenService {
    config: TokenConfig,
    http: GatewayHttpClient,
}

impl TokenService {
    pub fn new(config: TokenConfig, http: GatewayHttpClient) -> Self {
        Self { config, http }
    }

    pub async fn request_token(&self, card: &ClientCardInfo) -> GatewayResult<CardTokenResponse> {
        let request = CardTokenRequest {
            card_number: &card.card_number,
            card_expire: &card.card_expire,
            security_code: &card.security_code,
            card_holder_name: &card.card_holder_name,
            token_api_key: &self.config.api_token,
            lang: TOKEN_LANG,
        };
        self.http
            .post_json(&self.config.api_url, &request, &json_headers())
            .await
    }

    pub async fn get_card_token(&self, card: &ClientCardInfo) -> GatewayResult<String> {
        if card.card_number.trim().is_empty() {
            return Err(GatewayError::validation(
                "no card information",
                "card_number",
            ));
        }

        let response = self.request_token(card).await?;
        if response.status != STATUS_SUCCESS {
            warn!(code = %response.code, "card token request rejected");
            return Err(GatewayError::rejected(response.message));
        }

        info!(
            card_number = %response.req_card_number,
            expires = %response.token_expire_date,
            "card token issued"
        );
        Ok(response.token)
    }
}
