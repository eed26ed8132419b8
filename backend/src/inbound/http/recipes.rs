//! Recipe handlers.
//!
//! ```text
//! GET  /get-recipes
//! POST /add-recipe        token: <jwt>  {"title":"Soup","description":"Hot","images":[]}
//! GET  /get-recipe-by-id?recipeId=7
//! POST /upvote-recipe     token: <jwt>  {"recipeId":7}
//! ```
//!
//! Recipe payloads are relayed exactly as the contract returns them.

use actix_web::{get, post, web};
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::domain::{Error, NewRecipe, RecipeId};
use crate::inbound::http::ApiResult;
use crate::inbound::http::session::SessionUser;
use crate::inbound::http::state::HttpState;

/// Body of `POST /add-recipe`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct AddRecipeRequest {
    pub title: String,
    pub description: String,
    pub images: Vec<String>,
}

impl From<AddRecipeRequest> for NewRecipe {
    fn from(value: AddRecipeRequest) -> Self {
        Self {
            title: value.title,
            description: value.description,
            images: value.images,
        }
    }
}

/// Body of `POST /upvote-recipe`.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpvoteRequest {
    #[schema(value_type = String, example = "7")]
    pub recipe_id: RecipeId,
}

/// Query of `GET /get-recipe-by-id`.
#[derive(Debug, Deserialize, utoipa::IntoParams)]
#[serde(rename_all = "camelCase")]
#[into_params(parameter_in = Query)]
pub struct RecipeByIdQuery {
    #[param(value_type = String, example = "7")]
    pub recipe_id: RecipeId,
}

/// `{"message": ...}` acknowledgement of a committed write.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    fn new(message: &str) -> web::Json<Self> {
        web::Json(Self {
            message: message.to_owned(),
        })
    }
}

/// `{"result": ...}` wrapper for list views.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct ResultResponse {
    #[schema(value_type = Object)]
    pub result: Value,
}

/// `{"recipe": ...}` wrapper; `{}` when the id is unknown.
#[derive(Debug, Deserialize, Serialize, utoipa::ToSchema)]
pub struct RecipeResponse {
    #[schema(value_type = Object)]
    pub recipe: Value,
}

/// List every recipe the contract holds.
#[utoipa::path(
    get,
    path = "/get-recipes",
    responses(
        (status = 200, description = "Recipes", body = ResultResponse),
        (status = 500, description = "Contract call failed", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipes",
    security([])
)]
#[get("/get-recipes")]
pub async fn get_recipes(state: web::Data<HttpState>) -> ApiResult<web::Json<ResultResponse>> {
    let result = state.recipes_query.list_recipes().await?;
    Ok(web::Json(ResultResponse { result }))
}

/// Share a recipe as the authenticated user.
#[utoipa::path(
    post,
    path = "/add-recipe",
    request_body = AddRecipeRequest,
    responses(
        (status = 200, description = "Recipe added", body = MessageResponse),
        (status = 400, description = "Invalid request", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Contract call failed", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "addRecipe"
)]
#[post("/add-recipe")]
pub async fn add_recipe(
    session: SessionUser,
    state: web::Data<HttpState>,
    payload: web::Json<AddRecipeRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    let recipe = NewRecipe::from(payload.into_inner());
    state.recipes.add_recipe(session.user(), &recipe).await?;
    Ok(MessageResponse::new("Recipe added successfully"))
}

/// Look up one recipe by id.
#[utoipa::path(
    get,
    path = "/get-recipe-by-id",
    params(RecipeByIdQuery),
    responses(
        (status = 200, description = "Recipe, or an empty object when unknown", body = RecipeResponse),
        (status = 400, description = "Missing recipeId", body = Error),
        (status = 500, description = "Contract call failed", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "getRecipeById",
    security([])
)]
#[get("/get-recipe-by-id")]
pub async fn get_recipe_by_id(
    state: web::Data<HttpState>,
    query: web::Query<RecipeByIdQuery>,
) -> ApiResult<web::Json<RecipeResponse>> {
    let recipe = state
        .recipes_query
        .get_recipe(&query.recipe_id)
        .await?
        .unwrap_or_else(|| json!({}));
    Ok(web::Json(RecipeResponse { recipe }))
}

/// Upvote a recipe as the authenticated user.
#[utoipa::path(
    post,
    path = "/upvote-recipe",
    request_body = UpvoteRequest,
    responses(
        (status = 200, description = "Recipe upvoted", body = MessageResponse),
        (status = 400, description = "Own recipe or repeated upvote", body = Error),
        (status = 401, description = "Missing or invalid token", body = Error),
        (status = 500, description = "Contract call failed", body = Error)
    ),
    tags = ["recipes"],
    operation_id = "upvoteRecipe"
)]
#[post("/upvote-recipe")]
pub async fn upvote_recipe(
    session: SessionUser,
    state: web::Data<HttpState>,
    payload: web::Json<UpvoteRequest>,
) -> ApiResult<web::Json<MessageResponse>> {
    state
        .recipes
        .upvote_recipe(session.user(), &payload.recipe_id)
        .await?;
    Ok(MessageResponse::new("Recipe upvoted successfully"))
}

#[cfg(test)]
mod tests;
