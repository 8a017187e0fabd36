use crate::payments::error::{GatewayError, GatewayResult};
use crate::payments::types::{ConnectionParam, ConnectionResponse};
use reqwest::Url;
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::{debug, warn};

const USER_AGENT: &str = concat!("veritrans-gateway/", env!("CARGO_PKG_VERSION"));

/// JSON-over-HTTP client shared by every gateway service.
///
/// Each call is a single POST: no retries, no backoff and no timeout beyond
/// what reqwest does by default. Retry policy belongs to the caller.
#[derive(Debug, Clone)]
pub struct GatewayHttpClient {
    client: reqwest::Client,
}

impl GatewayHttpClient {
    pub fn new() -> GatewayResult<Self> {
        Ok(Self {
            client: build_client(USER_AGENT)?,
        })
    }

    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }

    /// Sends a signed envelope and decodes the gateway's response envelope.
    pub async fn send(
        &self,
        url: &str,
        envelope: &ConnectionParam,
    ) -> GatewayResult<ConnectionResponse> {
        self.post_json(url, envelope, &[("Content-Type", "application/json")])
            .await
    }

    pub async fn post_json<B, T>(
        &self,
        url: &str,
        body: &B,
        headers: &[(&str, &str)],
    ) -> GatewayResult<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let url = parse_url(url)?;
        let payload = serde_json::to_vec(body)?;

        debug!(url = %url, bytes = payload.len(), "sending gateway request");

        let mut request = self.client.post(url.clone()).body(payload);
        for (name, value) in headers {
            request = request.header(*name, *value);
        }

        let response = request.send().await.map_err(|e| GatewayError::Network {
            message: format!("gateway request to {} failed: {}", url, e),
        })?;

        let status = response.status();
        let text = response.text().await.map_err(|e| GatewayError::Network {
            message: format!("failed to read gateway response body: {}", e),
        })?;

        if !status.is_success() {
            // The gateway reports most failures in the body, so still try to decode it.
            warn!(url = %url, status = %status, "gateway answered with non-success HTTP status");
        }

        serde_json::from_str::<T>(&text).map_err(|e| GatewayError::Decode {
            message: format!("HTTP {}: {}", status, e),
        })
    }
}

/// A client that cannot be built is a startup fault, never a retryable one.
fn build_client(user_agent: &str) -> GatewayResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(user_agent)
        .build()
        .map_err(|e| {
            GatewayError::configuration(format!("failed to initialize HTTP client: {}", e))
        })
}

pub const JSON_UTF8: &str = "application/json; charset=utf-8";

pub fn json_headers() -> [(&'static str, &'static str); 2] {
    [("Content-Type", JSON_UTF8), ("Accept", "application/json")]
}

fn parse_url(raw: &str) -> GatewayResult<Url> {
    let url = Url::parse(raw).map_err(|e| GatewayError::InvalidUrl {
        url: raw.to_string(),
        reason: e.to_string(),
    })?;
    if !matches!(url.scheme(), "http" | "https") {
        return Err(GatewayError::InvalidUrl {
            url: raw.to_string(),
            reason: format!("unsupported scheme {}", url.scheme()),
        });
    }
    Ok(url)
}

/// `{base}/{first}/{second}` without doubling the separator when the base
/// already ends in a slash.
pub fn endpoint(base: &str, first: &str, second: &str) -> String {
    format!("{}/{}/{}", base.trim_end_matches('/'), first, second)
}
