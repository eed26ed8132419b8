//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{RecipeCommand, RecipeQuery};
use crate::inbound::http::session::SessionTokens;

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub recipes: Arc<dyn RecipeCommand>,
    pub recipes_query: Arc<dyn RecipeQuery>,
    pub tokens: Arc<SessionTokens>,
}

impl HttpState {
    /// Construct state from port implementations and the token service.
    ///
    /// # Examples
    /// ```
    /// use std::sync::Arc;
    ///
    /// use recipe_gateway::domain::ports::FixtureChainClient;
    /// use recipe_gateway::domain::{AccountAddress, RecipeGatewayService};
    /// use recipe_gateway::inbound::http::session::SessionTokens;
    /// use recipe_gateway::inbound::http::state::HttpState;
    ///
    /// let contract = AccountAddress::parse("0xcafe").unwrap();
    /// let service = Arc::new(RecipeGatewayService::new(Arc::new(FixtureChainClient::default()), contract));
    /// let state = HttpState::new(
    ///     service.clone(),
    ///     service,
    ///     Arc::new(SessionTokens::new(b"secret", None)),
    /// );
    /// let _tokens = state.tokens.clone();
    /// ```
    pub fn new(
        recipes: Arc<dyn RecipeCommand>,
        recipes_query: Arc<dyn RecipeQuery>,
        tokens: Arc<SessionTokens>,
    ) -> Self {
        Self {
            recipes,
            recipes_query,
            tokens,
        }
    }
}
