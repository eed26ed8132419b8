//! Server construction and middleware wiring.

mod config;
mod state_builders;

pub use config::ServerConfig;
pub use state_builders::{build_chain_client, build_http_state};

use actix_cors::Cors;
use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};

use recipe_gateway::Trace;
#[cfg(debug_assertions)]
use recipe_gateway::doc::ApiDoc;
use recipe_gateway::inbound::http::appreciations::get_all_appreciations;
use recipe_gateway::inbound::http::error::{json_error_handler, query_error_handler};
use recipe_gateway::inbound::http::health::{HealthState, index, live, ready};
use recipe_gateway::inbound::http::recipes::{
    add_recipe, get_recipe_by_id, get_recipes, upvote_recipe,
};
use recipe_gateway::inbound::http::state::HttpState;
use recipe_gateway::inbound::http::users::login;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[derive(Clone)]
struct AppDependencies {
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
}

fn build_app(
    deps: AppDependencies,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl actix_web::body::MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let AppDependencies {
        health_state,
        http_state,
    } = deps;

    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .app_data(web::JsonConfig::default().error_handler(json_error_handler))
        .app_data(web::QueryConfig::default().error_handler(query_error_handler))
        .wrap(Cors::permissive())
        .wrap(Trace)
        .service(index)
        .service(login)
        .service(get_recipes)
        .service(add_recipe)
        .service(get_recipe_by_id)
        .service(get_all_appreciations)
        .service(upvote_recipe)
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and configuration.
///
/// Readiness is not marked here; the caller flips it once start-up setup has run.
///
/// # Errors
/// Propagates [`std::io::Error`] when binding the socket fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let ServerConfig {
        bind_addr,
        http_state,
    } = config;

    let server = HttpServer::new(move || {
        build_app(AppDependencies {
            health_state: health_state.clone(),
            http_state: http_state.clone(),
        })
    })
    .bind(bind_addr)?
    .run();

    Ok(server)
}
