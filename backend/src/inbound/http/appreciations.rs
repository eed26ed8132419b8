//! Appreciation handler.
//!
//! ```text
//! GET /get-all-appreciations
//! ```

use actix_web::{get, web};
use serde_json::Value;

use crate::domain::Error;
use crate::inbound::http::ApiResult;
use crate::inbound::http::recipes::ResultResponse;
use crate::inbound::http::state::HttpState;

/// List every upvote recorded by the contract.
///
/// Unlike `/get-recipes`, the whole view result is returned.
#[utoipa::path(
    get,
    path = "/get-all-appreciations",
    responses(
        (status = 200, description = "Appreciations", body = ResultResponse),
        (status = 500, description = "Contract call failed", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getAllAppreciations",
    security([])
)]
#[get("/get-all-appreciations")]
pub async fn get_all_appreciations(
    state: web::Data<HttpState>,
) -> ApiResult<web::Json<ResultResponse>> {
    let values = state.recipes_query.list_appreciations().await?;
    Ok(web::Json(ResultResponse {
        result: Value::Array(values),
    }))
}
