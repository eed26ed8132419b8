//! Driven port for talking to the blockchain.
//!
//! The dispatcher owns the call shapes; adapters own transport, signing and
//! finality polling. Test doubles substitute this port to exercise handler
//! behaviour without a network.

use async_trait::async_trait;
use serde_json::Value;

use crate::domain::{AccountAddress, CommittedTransaction, EntryFunctionCall};

/// Errors surfaced while calling the chain.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ChainClientError {
    /// The node could not be reached or the connection failed mid-request.
    #[error("chain transport failed: {message}")]
    Transport { message: String },
    /// The node refused the request, or the transaction expired unexecuted.
    #[error("chain rejected request: {message}")]
    Rejected { message: String },
    /// The node answered with a payload the adapter could not decode.
    #[error("chain response decode failed: {message}")]
    Decode { message: String },
    /// The signing message could not be produced or signed.
    #[error("transaction signing failed: {message}")]
    Signing { message: String },
    /// The transaction was committed but the VM reported failure.
    #[error("transaction {hash} failed: {vm_status}")]
    Aborted { hash: String, vm_status: String },
}

impl ChainClientError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    pub fn rejected(message: impl Into<String>) -> Self {
        Self::Rejected {
            message: message.into(),
        }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn signing(message: impl Into<String>) -> Self {
        Self::Signing {
            message: message.into(),
        }
    }

    pub fn aborted(hash: impl Into<String>, vm_status: impl Into<String>) -> Self {
        Self::Aborted {
            hash: hash.into(),
            vm_status: vm_status.into(),
        }
    }

    /// VM status string of a committed-but-failed transaction.
    ///
    /// Only [`ChainClientError::Aborted`] carries one; every other failure
    /// returns `None`.
    pub fn vm_status(&self) -> Option<&str> {
        match self {
            Self::Aborted { vm_status, .. } => Some(vm_status.as_str()),
            _ => None,
        }
    }
}

/// Port for submitting contract calls.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChainClient: Send + Sync {
    /// Address of the single account signing every write.
    fn signer_address(&self) -> AccountAddress;

    /// Sign and submit a write, then wait until it is committed.
    ///
    /// Returns [`ChainClientError::Aborted`] when the transaction commits with
    /// a failed VM status.
    async fn submit_and_wait(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<CommittedTransaction, ChainClientError>;

    /// Evaluate a view function against current state.
    async fn view(&self, call: &EntryFunctionCall) -> Result<Vec<Value>, ChainClientError>;
}

/// In-memory chain used when no network settings are configured.
///
/// Every write commits with a deterministic hash and every view returns one
/// empty vector, the shape an empty contract registry produces.
#[derive(Debug, Clone)]
pub struct FixtureChainClient {
    signer: AccountAddress,
}

impl FixtureChainClient {
    /// Build a fixture signing as `signer`.
    pub fn new(signer: AccountAddress) -> Self {
        Self { signer }
    }
}

impl Default for FixtureChainClient {
    fn default() -> Self {
        Self::new(AccountAddress::from_bytes([0; 32]))
    }
}

#[async_trait]
impl ChainClient for FixtureChainClient {
    fn signer_address(&self) -> AccountAddress {
        self.signer.clone()
    }

    async fn submit_and_wait(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<CommittedTransaction, ChainClientError> {
        Ok(CommittedTransaction {
            hash: format!("0xfixture-{}", call.function().name()),
        })
    }

    async fn view(&self, call: &EntryFunctionCall) -> Result<Vec<Value>, ChainClientError> {
        let empty = match call.function() {
            crate::domain::ContractFunction::GetRecipeById => serde_json::json!({ "vec": [] }),
            _ => Value::Array(Vec::new()),
        };
        Ok(vec![empty])
    }
}
