//! Domain primitives, ports, and the chain-call dispatcher.
//!
//! Purpose: Define the strongly typed values the gateway relays between HTTP
//! clients and the recipe contract, plus the policy that classifies contract
//! failures. Nothing here knows about HTTP or the Aptos REST API.
//!
//! Public surface:
//! - Error / ErrorCode: client-facing error payload and stable code.
//! - Identity / AuthenticatedUser: who a session token speaks for.
//! - RecipeId / NewRecipe: recipe payloads forwarded to the contract.
//! - EntryFunctionCall / ContractFunction: the contract call surface.
//! - RecipeGatewayService: dispatcher implementing the driving ports.
//! - run_setup_tasks: start-up initialisation of the contract registries.

pub mod chain;
pub mod error;
pub mod identity;
pub mod outcome;
pub mod ports;
pub mod recipe;
pub mod recipe_gateway;
pub mod setup;
pub mod trace_id;

pub use self::chain::{
    AccountAddress, AccountAddressError, CallKind, CommittedTransaction, ContractFunction,
    EntryFunctionCall, RECIPES_MODULE,
};
pub use self::error::{
    Error, ErrorCode, ErrorValidationError, TRACE_ID_HEADER, UNKNOWN_ERROR_MESSAGE,
};
pub use self::identity::{AuthenticatedUser, Identity};
pub use self::outcome::{
    ALREADY_UPVOTED, AbortCode, CANNOT_UPVOTE_OWN_RECIPE, LoginFailure, USER_ALREADY_EXISTS,
    UpvoteFailure, classify_login_failure, classify_upvote_failure,
};
pub use self::recipe::{NewRecipe, RecipeId, RecipeIdValidationError, RecipeLookup};
pub use self::recipe_gateway::RecipeGatewayService;
pub use self::setup::{SETUP_STEPS, SetupReport, run_setup_tasks};
pub use self::trace_id::TraceId;

/// Convenient API result alias.
///
/// # Examples
/// ```
/// use actix_web::HttpResponse;
/// use recipe_gateway::domain::{ApiResult, Error};
///
/// fn handler() -> ApiResult<HttpResponse> {
///     Err(Error::unauthorized("Invalid token."))
/// }
/// ```
pub type ApiResult<T> = Result<T, Error>;
