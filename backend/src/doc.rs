//! OpenAPI documentation configuration.
//!
//! This module defines the [`ApiDoc`] struct which generates the OpenAPI
//! specification for the REST API. It registers every handler, the shared
//! error envelope, and the `token` header security scheme used by the
//! protected routes.
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

use crate::domain::{Error, ErrorCode};
use crate::inbound::http::recipes::{
    AddRecipeRequest, MessageResponse, RecipeResponse, ResultResponse, UpvoteRequest,
};
use crate::inbound::http::users::{LoginRequest, LoginResponse};

/// Enrich the generated document with the session token security scheme.
struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        let components = openapi
            .components
            .get_or_insert_with(utoipa::openapi::Components::default);

        components.add_security_scheme(
            "SessionToken",
            SecurityScheme::ApiKey(ApiKey::Header(ApiKeyValue::with_description(
                "token",
                "Session token issued by POST /login.",
            ))),
        );
    }
}

/// OpenAPI document for the REST API.
/// Swagger UI is enabled in debug builds only.
#[derive(OpenApi)]
#[openapi(
    modifiers(&SecurityAddon),
    info(
        title = "Recipe gateway API",
        description = "Share, browse, and upvote recipes stored in an Aptos Move contract.",
        license(name = "MIT", url = "https://opensource.org/licenses/MIT")
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    security(("SessionToken" = [])),
    paths(
        crate::inbound::http::users::login,
        crate::inbound::http::recipes::get_recipes,
        crate::inbound::http::recipes::add_recipe,
        crate::inbound::http::recipes::get_recipe_by_id,
        crate::inbound::http::recipes::upvote_recipe,
        crate::inbound::http::appreciations::get_all_appreciations,
        crate::inbound::http::health::index,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Error,
        ErrorCode,
        LoginRequest,
        LoginResponse,
        AddRecipeRequest,
        UpvoteRequest,
        MessageResponse,
        ResultResponse,
        RecipeResponse
    )),
    tags(
        (name = "users", description = "Login and session tokens"),
        (name = "recipes", description = "Recipe and appreciation relays"),
        (name = "health", description = "Endpoints for health checks")
    )
)]
pub struct ApiDoc;
