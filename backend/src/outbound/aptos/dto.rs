//! Wire types for the Aptos node REST API.

use serde::{Deserialize, Serialize};
use serde_json::Value;

const ENTRY_FUNCTION_PAYLOAD: &str = "entry_function_payload";
const ED25519_SIGNATURE: &str = "ed25519_signature";
const PENDING_TRANSACTION: &str = "pending_transaction";

/// `GET /accounts/{address}`.
#[derive(Debug, Deserialize)]
pub(super) struct AccountDto {
    pub(super) sequence_number: String,
}

/// `GET /estimate_gas_price`.
#[derive(Debug, Deserialize)]
pub(super) struct GasEstimateDto {
    pub(super) gas_estimate: u64,
}

/// `GET /` ledger information.
#[derive(Debug, Deserialize)]
pub(super) struct LedgerInfoDto {
    pub(super) ledger_timestamp: String,
}

impl LedgerInfoDto {
    /// Ledger time in whole seconds; the node reports microseconds.
    pub(super) fn timestamp_secs(&self) -> Option<i64> {
        self.ledger_timestamp
            .parse::<i64>()
            .ok()
            .map(|micros| micros / 1_000_000)
    }
}

/// Error body returned with non-2xx statuses.
#[derive(Debug, Deserialize)]
pub(super) struct NodeErrorDto {
    pub(super) message: String,
    #[serde(default)]
    pub(super) error_code: Option<String>,
    #[serde(default)]
    pub(super) vm_error_code: Option<u64>,
}

impl NodeErrorDto {
    pub(super) fn describe(&self) -> String {
        let mut text = self.message.clone();
        if let Some(code) = &self.error_code {
            text.push_str(&format!(" [{code}]"));
        }
        if let Some(vm_code) = self.vm_error_code {
            text.push_str(&format!(" (vm_error_code {vm_code})"));
        }
        text
    }
}

#[derive(Debug, Clone, Serialize)]
pub(super) struct EntryFunctionPayloadDto<'a> {
    #[serde(rename = "type")]
    kind: &'static str,
    function: &'a str,
    type_arguments: [&'static str; 0],
    arguments: &'a [Value],
}

impl<'a> EntryFunctionPayloadDto<'a> {
    pub(super) fn new(function: &'a str, arguments: &'a [Value]) -> Self {
        Self {
            kind: ENTRY_FUNCTION_PAYLOAD,
            function,
            type_arguments: [],
            arguments,
        }
    }
}

/// Unsigned transaction, as sent to `/transactions/encode_submission`.
#[derive(Debug, Clone, Serialize)]
pub(super) struct UserTransactionRequestDto<'a> {
    pub(super) sender: &'a str,
    pub(super) sequence_number: String,
    pub(super) max_gas_amount: String,
    pub(super) gas_unit_price: String,
    pub(super) expiration_timestamp_secs: String,
    pub(super) payload: EntryFunctionPayloadDto<'a>,
}

#[derive(Debug, Serialize)]
pub(super) struct Ed25519SignatureDto {
    #[serde(rename = "type")]
    kind: &'static str,
    public_key: String,
    signature: String,
}

impl Ed25519SignatureDto {
    pub(super) fn new(public_key: String, signature: String) -> Self {
        Self {
            kind: ED25519_SIGNATURE,
            public_key,
            signature,
        }
    }
}

/// Signed transaction, as sent to `POST /transactions`.
#[derive(Debug, Serialize)]
pub(super) struct SubmitTransactionRequestDto<'a> {
    #[serde(flatten)]
    pub(super) request: UserTransactionRequestDto<'a>,
    pub(super) signature: Ed25519SignatureDto,
}

/// `POST /view` body.
#[derive(Debug, Serialize)]
pub(super) struct ViewRequestDto<'a> {
    function: &'a str,
    type_arguments: [&'static str; 0],
    arguments: &'a [Value],
}

impl<'a> ViewRequestDto<'a> {
    pub(super) fn new(function: &'a str, arguments: &'a [Value]) -> Self {
        Self {
            function,
            type_arguments: [],
            arguments,
        }
    }
}

/// Response of `POST /transactions`.
#[derive(Debug, Deserialize)]
pub(super) struct PendingTransactionDto {
    pub(super) hash: String,
}

/// Response of `GET /transactions/by_hash/{hash}`.
#[derive(Debug, Deserialize)]
pub(super) struct TransactionDto {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    success: Option<bool>,
    #[serde(default)]
    vm_status: Option<String>,
}

/// Where a submitted transaction stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) enum TransactionStatus {
    Pending,
    Succeeded,
    Failed { vm_status: String },
}

impl TransactionDto {
    pub(super) fn status(&self) -> TransactionStatus {
        if self.kind == PENDING_TRANSACTION {
            return TransactionStatus::Pending;
        }
        match self.success {
            Some(true) => TransactionStatus::Succeeded,
            _ => TransactionStatus::Failed {
                vm_status: self.vm_status.clone().unwrap_or_default(),
            },
        }
    }
}
