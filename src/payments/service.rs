use crate::payments::account::AccountService;
use crate::payments::config::{ConnectionConfig, TokenConfig};
use crate::payments::error::GatewayResult;
use crate::payments::payment::PaymentService;
use crate::payments::token::{ClientCardInfo, TokenService};
use crate::payments::transport::GatewayHttpClient;
use crate::payments::types::{Account, AccountParam, Params, PaymentServiceType, TxnResult};
use async_trait::async_trait;
use std::sync::Arc;

/// Everything the HTTP surface can ask of the gateway. Implemented by
/// [`Gateway`] and by decorators such as the logging middleware.
#[async_trait]
pub trait GatewayService: Send + Sync {
    async fn get_card_token(&self, card: ClientCardInfo) -> GatewayResult<String>;

    async fn create_account(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn update_account(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn delete_account(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn restore_account(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn get_account(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn create_card(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn update_card(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn delete_card(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn restore_card(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn get_card(&self, account: AccountParam) -> GatewayResult<Account>;

    async fn authorize(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult>;

    async fn capture(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult>;

    async fn cancel(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult>;

    async fn search(&self, params: Params) -> GatewayResult<TxnResult>;
}

/// The three gateway clients behind one facade.
#[derive(Debug, Clone)]
pub struct Gateway {
    tokens: TokenService,
    accounts: AccountService,
    payments: PaymentService,
}

impl Gateway {
    pub fn new(connection: ConnectionConfig, token: TokenConfig) -> GatewayResult<Self> {
        let http = GatewayHttpClient::new()?;
        let connection = Arc::new(connection);
        Ok(Self {
            tokens: TokenService::new(token, http.clone()),
            accounts: AccountService::new(connection.clone(), http.clone()),
            payments: PaymentService::new(connection, http)?,
        })
    }

    pub fn from_parts(
        tokens: TokenService,
        accounts: AccountService,
        payments: PaymentService,
    ) -> Self {
        Self {
            tokens,
            accounts,
            payments,
        }
    }

    pub fn accounts(&self) -> &AccountService {
        &self.accounts
    }

    pub fn payments(&self) -> &PaymentService {
        &self.payments
    }
}

#[async_trait]
impl GatewayService for Gateway {
    async fn get_card_token(&self, card: ClientCardInfo) -> GatewayResult<String> {
        self.tokens.get_card_token(&card).await
    }

    async fn create_account(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.create_account(&account).await
    }

    async fn update_account(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.update_account(&account).await
    }

    async fn delete_account(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.delete_account(&account).await
    }

    async fn restore_account(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.restore_account(&account).await
    }

    async fn get_account(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.get_account(&account).await
    }

    async fn create_card(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.create_card(&account).await
    }

    async fn update_card(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.update_card(&account).await
    }

    async fn delete_card(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.delete_card(&account).await
    }

    async fn restore_card(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.restore_card(&account).await
    }

    async fn get_card(&self, account: AccountParam) -> GatewayResult<Account> {
        self.accounts.get_card(&account).await
    }

    async fn authorize(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        self.payments.authorize(&params, service_type).await
    }

    async fn capture(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        self.payments.capture(&params, service_type).await
    }

    async fn cancel(
        &self,
        params: Params,
        service_type: PaymentServiceType,
    ) -> GatewayResult<TxnResult> {
        self.payments.cancel(&params, service_type).await
    }

    async fn search(&self, params: Params) -> GatewayResult<TxnResult> {
        self.payments.search(&params).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payments::error::GatewayError;

    fn connection(payment_api_url: &str) -> ConnectionConfig {
        ConnectionConfig {
            merchant_ccid: "MERCHANT".to_string(),
            merchant_password: "secret".to_string(),
            account_api_url: "https://api.example.jp/paynowid/v1".to_string(),
            payment_api_url: payment_api_url.to_string(),
            search_api_url: String::new(),
            txn_version: "2.0.0".to_string(),
            dummy_request: "1".to_string(),
        }
    }

    #[test]
    fn gateway_requires_payment_url() {
        let err = Gateway::new(connection(""), TokenConfig::default()).unwrap_err();
        assert!(matches!(err, GatewayError::Configuration { .. }));
    }

    #[test]
    fn gateway_can_be_used_as_trait_object() {
        let gateway = Gateway::new(
            connection("https://api.example.jp/paynow/v2"),
            TokenConfig::default(),
        )
        .expect("gateway init should succeed");
        let _service: Arc<dyn GatewayService> = Arc::new(gateway);
    }
}
