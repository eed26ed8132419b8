//! One-shot initialisation of the contract registries.
//!
//! Runs once per process start, after the listener is bound. Each step is its
//! own failure boundary: a failed step is logged and the remaining steps still
//! run. Re-running against an initialised contract is harmless because the
//! failures are swallowed.

use tracing::{info, warn};

use crate::domain::ports::ChainClient;
use crate::domain::{AccountAddress, ContractFunction, EntryFunctionCall};

/// Initialisation writes in the order they are submitted.
pub const SETUP_STEPS: [ContractFunction; 4] = [
    ContractFunction::CreateUserList,
    ContractFunction::CreateRecipeList,
    ContractFunction::CreateAppreciationList,
    ContractFunction::MintCoin,
];

/// Outcome of [`run_setup_tasks`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SetupReport {
    /// Steps whose write committed.
    pub committed: Vec<ContractFunction>,
    /// Steps whose write failed; already logged.
    pub failed: Vec<ContractFunction>,
}

impl SetupReport {
    /// Whether every step committed.
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Submit every setup write sequentially, swallowing failures.
pub async fn run_setup_tasks(chain: &dyn ChainClient, contract: &AccountAddress) -> SetupReport {
    let mut report = SetupReport::default();
    for step in SETUP_STEPS {
        let call = EntryFunctionCall::new(contract, step, Vec::new());
        match chain.submit_and_wait(&call).await {
            Ok(committed) => {
                info!(function = call.function_id(), hash = %committed.hash, "setup step committed");
                report.committed.push(step);
            }
            Err(err) => {
                warn!(function = call.function_id(), error = %err, "setup step failed");
                report.failed.push(step);
            }
        }
    }
    report
}
