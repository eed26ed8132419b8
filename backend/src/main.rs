//! Gateway entry-point: loads settings, wires the chain client and serves HTTP.

mod server;

use std::net::SocketAddr;
use std::path::Path;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use recipe_gateway::config::{
    BuildMode, GatewaySettings, gateway_settings_from_env, load_env_file,
};
use recipe_gateway::domain::run_setup_tasks;
use recipe_gateway::inbound::http::health::HealthState;
use recipe_gateway::inbound::http::session::SessionTokens;
use server::{ServerConfig, build_chain_client, build_http_state, create_server};

/// Read `.env` when present, then parse settings from the process environment.
fn load_settings() -> std::io::Result<GatewaySettings> {
    match load_env_file(Path::new(".env")) {
        Ok(true) => info!("loaded .env"),
        Ok(false) => {}
        Err(e) => warn!(error = %e, "ignoring unreadable .env"),
    }
    gateway_settings_from_env(&mockable::DefaultEnv::new(), BuildMode::from_debug_assertions())
        .map_err(|e| std::io::Error::other(format!("invalid configuration: {e}")))
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = load_settings()?;

    let wiring = build_chain_client(settings.chain)?;
    let tokens = SessionTokens::new(&settings.token_secret, settings.token_ttl);
    let http_state = build_http_state(&wiring, tokens);

    let bind_addr = SocketAddr::from(([0, 0, 0, 0], settings.port));
    let health_state = web::Data::new(HealthState::new());
    let config = ServerConfig::new(bind_addr, http_state);
    info!(addr = %config.bind_addr(), "listening");
    let server = create_server(health_state.clone(), config)?;

    let setup_client = wiring.client.clone();
    let contract = wiring.contract.clone();
    actix_web::rt::spawn(async move {
        let report = run_setup_tasks(setup_client.as_ref(), &contract).await;
        if report.is_complete() {
            info!(committed = report.committed.len(), "contract setup finished");
        } else {
            warn!(
                committed = report.committed.len(),
                failed = report.failed.len(),
                "contract setup finished with failures"
            );
        }
        health_state.mark_ready();
    });

    server.await
}
