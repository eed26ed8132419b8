//! Builders wiring the chain client and dispatcher from settings.

use std::sync::Arc;

use actix_web::web;
use tracing::{info, warn};

use recipe_gateway::config::ChainSettings;
use recipe_gateway::domain::ports::{ChainClient, FixtureChainClient};
use recipe_gateway::domain::{AccountAddress, RecipeGatewayService};
use recipe_gateway::inbound::http::session::SessionTokens;
use recipe_gateway::inbound::http::state::HttpState;
use recipe_gateway::outbound::aptos::{AptosRestClient, LocalAccount};

/// Chain client plus the contract it targets.
pub struct ChainWiring {
    pub client: Arc<dyn ChainClient>,
    pub contract: AccountAddress,
}

/// Build the chain client selected by configuration.
///
/// # Errors
/// Returns [`std::io::Error`] when the private key is malformed or the HTTP
/// client cannot be constructed.
pub fn build_chain_client(settings: ChainSettings) -> std::io::Result<ChainWiring> {
    match settings {
        ChainSettings::Aptos(aptos) => {
            let account = LocalAccount::from_private_key_hex(&aptos.private_key).map_err(|e| {
                std::io::Error::other(format!("invalid ACCOUNT_PRIVATE_KEY: {e}"))
            })?;
            info!(
                signer = %account.address(),
                contract = %aptos.contract,
                node = %aptos.node_url,
                "using Aptos node"
            );
            let client = AptosRestClient::new(aptos.node_url, account).map_err(|e| {
                std::io::Error::other(format!("failed to build Aptos client: {e}"))
            })?;
            Ok(ChainWiring {
                client: Arc::new(client),
                contract: aptos.contract,
            })
        }
        ChainSettings::Fixture { contract } => {
            warn!(contract = %contract, "using in-memory fixture chain (dev only)");
            Ok(ChainWiring {
                client: Arc::new(FixtureChainClient::default()),
                contract,
            })
        }
    }
}

/// Build handler state around one dispatcher shared by both driving ports.
pub fn build_http_state(wiring: &ChainWiring, tokens: SessionTokens) -> web::Data<HttpState> {
    let service = Arc::new(RecipeGatewayService::new(
        wiring.client.clone(),
        wiring.contract.clone(),
    ));
    web::Data::new(HttpState::new(
        service.clone(),
        service,
        Arc::new(tokens),
    ))
}
