//! Reqwest-backed Aptos node adapter.
//!
//! This adapter owns transport details only: building and signing user
//! transactions, polling for finality, and mapping node responses into
//! [`ChainClientError`] values. Call shapes come from the dispatcher.

use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;
use reqwest::{Client, StatusCode, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use super::dto::{
    AccountDto, Ed25519SignatureDto, EntryFunctionPayloadDto, GasEstimateDto, LedgerInfoDto,
    NodeErrorDto,
    PendingTransactionDto, SubmitTransactionRequestDto, TransactionDto, TransactionStatus,
    UserTransactionRequestDto, ViewRequestDto,
};
use super::signer::LocalAccount;
use crate::domain::ports::{ChainClient, ChainClientError};
use crate::domain::{AccountAddress, CommittedTransaction, EntryFunctionCall};

const DEFAULT_MAX_GAS_AMOUNT: u64 = 200_000;
const DEFAULT_EXPIRATION: Duration = Duration::from_secs(20);
const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(500);
const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(30);
const DEFAULT_USER_AGENT: &str = "recipe-gateway/0.1";

/// Tunables for transaction submission.
#[derive(Debug, Clone)]
pub struct SubmissionSettings {
    /// Upper bound on gas units a write may consume.
    pub max_gas_amount: u64,
    /// How long a signed transaction stays valid.
    pub expiration: Duration,
    /// Delay between finality polls.
    pub poll_interval: Duration,
    /// Timeout applied to each individual HTTP request.
    pub request_timeout: Duration,
}

impl Default for SubmissionSettings {
    fn default() -> Self {
        Self {
            max_gas_amount: DEFAULT_MAX_GAS_AMOUNT,
            expiration: DEFAULT_EXPIRATION,
            poll_interval: DEFAULT_POLL_INTERVAL,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}

/// Chain client that signs locally and talks to one Aptos node.
pub struct AptosRestClient {
    client: Client,
    base: Url,
    account: LocalAccount,
    settings: SubmissionSettings,
}

impl AptosRestClient {
    /// Build an adapter against `node_url` with default submission settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn new(node_url: Url, account: LocalAccount) -> Result<Self, reqwest::Error> {
        Self::with_settings(node_url, account, SubmissionSettings::default())
    }

    /// Build an adapter with explicit submission settings.
    ///
    /// # Errors
    ///
    /// Returns an error when the reqwest client cannot be constructed.
    pub fn with_settings(
        node_url: Url,
        account: LocalAccount,
        settings: SubmissionSettings,
    ) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(settings.request_timeout)
            .user_agent(DEFAULT_USER_AGENT)
            .build()?;
        Ok(Self {
            client,
            base: normalise_base(node_url),
            account,
            settings,
        })
    }

    fn endpoint(&self, path: &str) -> Result<Url, ChainClientError> {
        self.base
            .join(path)
            .map_err(|error| ChainClientError::transport(format!("invalid node path {path}: {error}")))
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ChainClientError> {
        self.get_json_at(self.endpoint(path)?).await
    }

    async fn get_json_at<T: DeserializeOwned>(&self, url: Url) -> Result<T, ChainClientError> {
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn post_json<B, T>(&self, path: &str, body: &B) -> Result<T, ChainClientError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .client
            .post(self.endpoint(path)?)
            .json(body)
            .send()
            .await
            .map_err(map_transport_error)?;
        decode_response(response).await
    }

    async fn sequence_number(&self) -> Result<String, ChainClientError> {
        let account: AccountDto = self
            .get_json(&format!("accounts/{}", self.account.address()))
            .await?;
        Ok(account.sequence_number)
    }

    async fn gas_unit_price(&self) -> Result<u64, ChainClientError> {
        let estimate: GasEstimateDto = self.get_json("estimate_gas_price").await?;
        Ok(estimate.gas_estimate)
    }

    /// Node index (`GET /v1`), which carries the ledger clock.
    fn ledger_url(&self) -> Url {
        let mut url = self.base.clone();
        let path = self.base.path().trim_end_matches('/').to_owned();
        url.set_path(&path);
        url
    }

    async fn ledger_timestamp_secs(&self) -> Result<i64, ChainClientError> {
        let ledger: LedgerInfoDto = self.get_json_at(self.ledger_url()).await?;
        ledger.timestamp_secs().ok_or_else(|| {
            ChainClientError::decode(format!(
                "invalid ledger_timestamp {}",
                ledger.ledger_timestamp
            ))
        })
    }

    async fn signing_message(
        &self,
        request: &UserTransactionRequestDto<'_>,
    ) -> Result<Vec<u8>, ChainClientError> {
        let encoded: String = self
            .post_json("transactions/encode_submission", request)
            .await?;
        decode_hex(&encoded)
    }

    /// Poll until the node reports the transaction as committed.
    ///
    /// A transaction the node has never indexed is abandoned once the ledger
    /// clock reaches `expires_at`. There is no other deadline.
    async fn wait_for(
        &self,
        hash: &str,
        expires_at: i64,
    ) -> Result<CommittedTransaction, ChainClientError> {
        let path = format!("transactions/by_hash/{hash}");
        loop {
            let response = self
                .client
                .get(self.endpoint(&path)?)
                .send()
                .await
                .map_err(map_transport_error)?;
            // Freshly submitted transactions may not be indexed yet.
            if response.status() == StatusCode::NOT_FOUND {
                if self.ledger_timestamp_secs().await? >= expires_at {
                    return Err(ChainClientError::rejected(format!(
                        "transaction {hash} expired before execution"
                    )));
                }
            } else {
                let transaction: TransactionDto = decode_response(response).await?;
                match transaction.status() {
                    TransactionStatus::Pending => {}
                    TransactionStatus::Succeeded => {
                        return Ok(CommittedTransaction {
                            hash: hash.to_owned(),
                        });
                    }
                    TransactionStatus::Failed { vm_status } => {
                        return Err(ChainClientError::aborted(hash, vm_status));
                    }
                }
            }
            tokio::time::sleep(self.settings.poll_interval).await;
        }
    }
}

#[async_trait]
impl ChainClient for AptosRestClient {
    fn signer_address(&self) -> AccountAddress {
        self.account.address().clone()
    }

    async fn submit_and_wait(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<CommittedTransaction, ChainClientError> {
        let sequence_number = self.sequence_number().await?;
        let gas_unit_price = self.gas_unit_price().await?;
        let expires_at = expiration_timestamp(self.settings.expiration);
        let request = UserTransactionRequestDto {
            sender: self.account.address().as_str(),
            sequence_number,
            max_gas_amount: self.settings.max_gas_amount.to_string(),
            gas_unit_price: gas_unit_price.to_string(),
            expiration_timestamp_secs: expires_at.to_string(),
            payload: EntryFunctionPayloadDto::new(call.function_id(), call.arguments()),
        };

        let message = self.signing_message(&request).await?;
        let signature = Ed25519SignatureDto::new(
            self.account.public_key_hex(),
            self.account.sign_hex(&message),
        );
        let pending: PendingTransactionDto = self
            .post_json("transactions", &SubmitTransactionRequestDto { request, signature })
            .await?;
        debug!(function = call.function_id(), hash = %pending.hash, "transaction submitted");

        self.wait_for(&pending.hash, expires_at).await
    }

    async fn view(&self, call: &EntryFunctionCall) -> Result<Vec<Value>, ChainClientError> {
        self.post_json(
            "view",
            &ViewRequestDto::new(call.function_id(), call.arguments()),
        )
        .await
    }
}

/// Ensure relative joins append to the `/v1` path instead of replacing it.
fn normalise_base(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn expiration_timestamp(expiration: Duration) -> i64 {
    let lifetime = i64::try_from(expiration.as_secs()).unwrap_or(i64::MAX);
    Utc::now().timestamp().saturating_add(lifetime)
}

fn decode_hex(encoded: &str) -> Result<Vec<u8>, ChainClientError> {
    let digits = encoded.strip_prefix("0x").unwrap_or(encoded);
    hex::decode(digits).map_err(|error| {
        ChainClientError::signing(format!("signing message is not hex: {error}"))
    })
}

async fn decode_response<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ChainClientError> {
    let status = response.status();
    let body = response.bytes().await.map_err(map_transport_error)?;
    if !status.is_success() {
        return Err(map_status_error(status, body.as_ref()));
    }
    serde_json::from_slice(body.as_ref()).map_err(|error| {
        ChainClientError::decode(format!("invalid node JSON payload: {error}"))
    })
}

fn map_transport_error(error: reqwest::Error) -> ChainClientError {
    ChainClientError::transport(error.to_string())
}

fn map_status_error(status: StatusCode, body: &[u8]) -> ChainClientError {
    let detail = serde_json::from_slice::<NodeErrorDto>(body)
        .map(|node_error| node_error.describe())
        .unwrap_or_else(|_| body_preview(body));
    let message = if detail.is_empty() {
        format!("status {}", status.as_u16())
    } else {
        format!("status {}: {}", status.as_u16(), detail)
    };

    if status.is_client_error() {
        ChainClientError::rejected(message)
    } else {
        ChainClientError::transport(message)
    }
}

fn body_preview(body: &[u8]) -> String {
    const PREVIEW_CHAR_LIMIT: usize = 160;

    let compact = String::from_utf8_lossy(body)
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ");
    let preview = compact.chars().take(PREVIEW_CHAR_LIMIT).collect::<String>();
    if compact.chars().count() > PREVIEW_CHAR_LIMIT {
        format!("{preview}...")
    } else {
        preview
    }
}
