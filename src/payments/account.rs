use crate::payments::config::ConnectionConfig;
use crate::payments::envelope::{account_params, build};
use crate::payments::error::{GatewayError, GatewayResult};
use crate::payments::transport::{endpoint, GatewayHttpClient};
use crate::payments::types::{Account, AccountMode, AccountParam, AccountResource};
use std::sync::Arc;
use tracing::{info, warn};

/// Account and stored-card management against the PayNowID API.
#[derive(Debug, Clone)]
pub struct AccountService {
    config: Arc<ConnectionConfig>,
    http: GatewayHttpClient,
}

impl AccountService {
    pub fn new(config: Arc<ConnectionConfig>, http: GatewayHttpClient) -> Self {
        Self { config, http }
    }

    /// Runs `{mode}/{resource}` for the given account and returns the account
    /// state the gateway reports back. A refusal surfaces as
    /// [`GatewayError::Rejected`] with the gateway's message untouched.
    pub async fn execute(
        &self,
        mode: AccountMode,
        resource: AccountResource,
        account: &AccountParam,
    ) -> GatewayResult<Account> {
        let envelope = build(account_params(account.clone()), &self.config)?;
        let url = endpoint(&self.config.account_api_url, mode.as_str(), resource.as_str());

        let response = self.http.send(&url, &envelope).await?;

        if !response.result.is_success() {
            warn!(
                mode = %mode,
                resource = %resource,
                result_code = %response.result.v_result_code,
                "gateway rejected account operation"
            );
            return Err(GatewayError::rejected(response.result.merr_msg));
        }

        let account = response
            .pay_now_id_response
            .map(|r| r.account)
            .ok_or_else(|| GatewayError::Decode {
                message: "successful account response without payNowIdResponse".to_string(),
            })?;

        info!(
            mode = %mode,
            resource = %resource,
            account_id = %account.account_id,
            cards = account.card_info.len(),
            "account operation succeeded"
        );
        Ok(account)
    }

    pub async fn create_account(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Add, AccountResource::Account, account)
            .await
    }

    pub async fn update_account(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Update, AccountResource::Account, account)
            .await
    }

    pub async fn delete_account(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Delete, AccountResource::Account, account)
            .await
    }

    pub async fn restore_account(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Restore, AccountResource::Account, account)
            .await
    }

    pub async fn get_account(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Get, AccountResource::Account, account)
            .await
    }

    pub async fn create_card(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Add, AccountResource::CardInfo, account)
            .await
    }

    pub async fn update_card(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Update, AccountResource::CardInfo, account)
            .await
    }

    pub async fn delete_card(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Delete, AccountResource::CardInfo, account)
            .await
    }

    pub async fn restore_card(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Restore, AccountResource::CardInfo, account)
            .await
    }

    pub async fn get_card(&self, account: &AccountParam) -> GatewayResult<Account> {
        self.execute(AccountMode::Get, AccountResource::CardInfo, account)
            .await
    }
}
