//! Recipe gateway service: the chain-call dispatcher.
//!
//! Implements the recipe driving ports by translating each operation into
//! exactly one entry-function call. Writes are signed by the single gateway
//! account and awaited until committed; views are evaluated with the gateway
//! account as the caller address. Failures are classified here so adapters
//! only see domain errors.

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::{Value, json};
use tracing::{error, info};

use crate::domain::outcome::{LoginFailure, classify_login_failure, classify_upvote_failure};
use crate::domain::ports::{ChainClient, ChainClientError, RecipeCommand, RecipeQuery};
use crate::domain::{
    AccountAddress, AuthenticatedUser, CallKind, CommittedTransaction, ContractFunction, EntryFunctionCall,
    Error, Identity, NewRecipe, RecipeId, RecipeLookup,
};

/// Dispatcher implementing [`RecipeCommand`] and [`RecipeQuery`].
#[derive(Clone)]
pub struct RecipeGatewayService {
    chain: Arc<dyn ChainClient>,
    contract: AccountAddress,
    caller: AccountAddress,
}

impl RecipeGatewayService {
    /// Create a dispatcher for the `recipes` module published at `contract`.
    pub fn new(chain: Arc<dyn ChainClient>, contract: AccountAddress) -> Self {
        let caller = chain.signer_address();
        Self {
            chain,
            contract,
            caller,
        }
    }

    fn entry(&self, function: ContractFunction, arguments: Vec<Value>) -> EntryFunctionCall {
        EntryFunctionCall::new(&self.contract, function, arguments)
    }

    async fn write(
        &self,
        function: ContractFunction,
        arguments: Vec<Value>,
    ) -> Result<CommittedTransaction, ChainClientError> {
        debug_assert_eq!(function.kind(), CallKind::Write, "{} is a view", function.name());
        let call = self.entry(function, arguments);
        let committed = self.chain.submit_and_wait(&call).await?;
        info!(
            function = call.function_id(),
            hash = %committed.hash,
            "transaction committed"
        );
        Ok(committed)
    }

    async fn view(
        &self,
        function: ContractFunction,
        arguments: Vec<Value>,
    ) -> Result<Vec<Value>, Error> {
        debug_assert_eq!(function.kind(), CallKind::View, "{} is a write", function.name());
        let call = self.entry(function, arguments);
        self.chain
            .view(&call)
            .await
            .map_err(|err| unknown_failure(function, &err))
    }

    fn caller_argument(&self) -> Value {
        json!(self.caller.as_str())
    }
}

fn unknown_failure(function: ContractFunction, err: &ChainClientError) -> Error {
    error!(function = function.name(), error = %err, "contract call failed");
    Error::unknown()
}

/// Unwrap a Move `Option` (`{"vec": [..]}`) from the first view value.
fn first_option(values: &[Value]) -> RecipeLookup {
    values
        .first()
        .and_then(|value| value.get("vec"))
        .and_then(Value::as_array)
        .and_then(|vec| vec.first())
        .cloned()
}

#[async_trait]
impl RecipeCommand for RecipeGatewayService {
    async fn login(&self, identity: &Identity) -> Result<(), Error> {
        let arguments = vec![json!(identity.email()), json!(identity.name())];
        match self.write(ContractFunction::LoginUser, arguments).await {
            Ok(_) => Ok(()),
            Err(err) => match classify_login_failure(&err) {
                LoginFailure::AlreadyRegistered => {
                    info!(email = identity.email(), "user already registered");
                    Ok(())
                }
                LoginFailure::Unknown => Err(unknown_failure(ContractFunction::LoginUser, &err)),
            },
        }
    }

    async fn add_recipe(&self, user: &AuthenticatedUser, recipe: &NewRecipe) -> Result<(), Error> {
        let arguments = vec![
            json!(recipe.title),
            json!(recipe.description),
            json!(recipe.images),
            json!(user.email()),
        ];
        self.write(ContractFunction::AddRecipe, arguments)
            .await
            .map(|_| ())
            .map_err(|err| unknown_failure(ContractFunction::AddRecipe, &err))
    }

    async fn upvote_recipe(
        &self,
        user: &AuthenticatedUser,
        recipe_id: &RecipeId,
    ) -> Result<(), Error> {
        let arguments = vec![json!(recipe_id.as_str()), json!(user.email())];
        match self.write(ContractFunction::AppreciateAndMint, arguments).await {
            Ok(_) => Ok(()),
            Err(err) => {
                let failure = classify_upvote_failure(&err);
                match failure.rejection_message() {
                    Some(message) => {
                        info!(recipe_id = %recipe_id, reason = message, "upvote rejected");
                        Err(Error::invalid_request(message))
                    }
                    None => Err(unknown_failure(ContractFunction::AppreciateAndMint, &err)),
                }
            }
        }
    }
}

#[async_trait]
impl RecipeQuery for RecipeGatewayService {
    async fn list_recipes(&self) -> Result<Value, Error> {
        let values = self
            .view(ContractFunction::GetAllRecipes, vec![self.caller_argument()])
            .await?;
        Ok(values.into_iter().next().unwrap_or(Value::Null))
    }

    async fn get_recipe(&self, recipe_id: &RecipeId) -> Result<RecipeLookup, Error> {
        let arguments = vec![self.caller_argument(), json!(recipe_id.as_str())];
        let values = self
            .view(ContractFunction::GetRecipeById, arguments)
            .await?;
        Ok(first_option(&values))
    }

    async fn list_appreciations(&self) -> Result<Vec<Value>, Error> {
        self.view(
            ContractFunction::GetAllAppreciations,
            vec![self.caller_argument()],
        )
        .await
    }
}
