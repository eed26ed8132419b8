//! Login handler.
//!
//! ```text
//! POST /login {"email":"a@x.com","name":"A"}
//! ```

use actix_web::{post, web};
use serde::{Deserialize, Serialize};

use crate::domain::{Error, Identity};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Login request body for `POST /login`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginRequest {
    pub email: String,
    pub name: String,
}

/// Successful login payload.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct LoginResponse {
    #[schema(example = "User logged in successfully")]
    pub message: String,
    pub token: String,
}

/// Register the user in the contract and issue a session token.
///
/// Logging in as an already registered user succeeds.
#[utoipa::path(
    post,
    path = "/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login success", body = LoginResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 500, description = "Contract call failed", body = Error)
    ),
    tags = ["users"],
    operation_id = "login",
    security([])
)]
#[post("/login")]
pub async fn login(
    state: web::Data<HttpState>,
    payload: web::Json<LoginRequest>,
) -> ApiResult<web::Json<LoginResponse>> {
    let LoginRequest { email, name } = payload.into_inner();
    let identity = Identity::new(email, name);
    state.recipes.login(&identity).await?;
    let token = state.tokens.issue(&identity)?;
    Ok(web::Json(LoginResponse {
        message: "User logged in successfully".to_owned(),
        token,
    }))
}
