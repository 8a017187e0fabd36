use crate::payments::config::ConnectionConfig;
use crate::payments::envelope::build;
use crate::payments::error::{GatewayError, GatewayResult};
use crate::payments::transport::{endpoint, GatewayHttpClient};
use crate::payments::types::{Params, PaymentMode, PaymentServiceType, TxnResult};
use std::sync::Arc;
use tracing::{info, warn};

/// Authorize/capture/cancel against the payment API and order lookups against
/// the search API.
#[derive(Debug, Clone)]
pub struct PaymentService {
    config: Arc<ConnectionConfig>,
    http: GatewayHttpClient,
}

impl PaymentService {
    /// Fails with [`GatewayError::Configuration`] when no payment API URL is
    /// configured, instead of failing on the first call.
    pub fn new(config: Arc<ConnectionConfig>, http: GatewayHttpClient) -> GatewayResult<Self> {
        if config.payment_api_url.trim().is_empty() {
            return Err(GatewayError::configuration("payment API URL not provided"));
        }
        Ok(Self { config, http })
    }

    fn base_url(&self, mode: PaymentMode) -> &str {
        match mode {
            PaymentMode::Search => &self.config.search_api_url,
            _ => &self.config.payment_api_url,
        }
    }

    pub async fn execute(
        &self,
        mode: PaymentMode,
        service_type: PaymentServiceType,
        params: &Params,
    ) -> GatewayResult<TxnResult> {
        let envelope = build(params.clone(), &self.config)?;
        let url = endpoint(self.base_url(mode), mode.as_str(), service_type.as_str());

        let response = self.http.send(&url, &envelope).await?;
        let result = response.result;

        if !result.is_success() {
            warn!(
                mode = %mode,
                service_type = %service_type,
                order_id = %params.order_id,
                result_code = %result.v_result_code,
                "gateway rejected payment operation"
            );
            return Err(GatewayError::rejected(result.merr_msg));
        }

        info!(
            mode = %mode,
            service_type = %service_type,
            order_id = %params.order_id,
            orders = result.orders().len(),
            "payment operation succeeded"
        );
        Ok(result)
    }

    /// `params.with_capture` decides whether the sale is captured immediately.
    pub async fn authorize(
        &self,
        params: &Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        self.execute(PaymentMode::Authorize, service_type, params)
            .await
    }

    pub async fn capture(
        &self,
        params: &Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        self.execute(PaymentMode::Capture, service_type, params)
            .await
    }

    pub async fn cancel(
        &self,
        params: &Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        self.execute(PaymentMode::Cancel, service_type, params)
            .await
    }

    /// Read-only order lookup, routed to `{search_api_url}/Search/search`.
    pub async fn search(&self, params: &Params) -> GatewayResult<TxnResult> {
        self.execute(PaymentMode::Search, PaymentServiceType::Search, params)
            .await
    }
}
