//! Handler tests for recipe endpoints.

use super::*;
use crate::domain::ports::{MockRecipeCommand, MockRecipeQuery};
use crate::inbound::http::error::{json_error_handler, query_error_handler};
use crate::inbound::http::session::TOKEN_HEADER;
use crate::inbound::http::test_utils::{test_state, valid_token};
use actix_web::http::StatusCode;
use actix_web::{App, test as actix_test};
use rstest::rstest;

async fn call(
    command: MockRecipeCommand,
    query: MockRecipeQuery,
    request: actix_test::TestRequest,
) -> (StatusCode, Value) {
    let app = actix_test::init_service(
        App::new()
            .app_data(test_state(command, query))
            .app_data(web::JsonConfig::default().error_handler(json_error_handler))
            .app_data(web::QueryConfig::default().error_handler(query_error_handler))
            .service(get_recipes)
            .service(add_recipe)
            .service(get_recipe_by_id)
            .service(upvote_recipe),
    )
    .await;
    let response = actix_test::call_service(&app, request.to_request()).await;
    let status = response.status();
    let body: Value = actix_test::read_body_json(response).await;
    (status, body)
}

fn soup() -> Value {
    json!({ "title": "Soup", "description": "Hot", "images": ["https://img/1"] })
}

#[rstest]
#[actix_web::test]
async fn get_recipes_wraps_view_result() {
    let mut query = MockRecipeQuery::new();
    query
        .expect_list_recipes()
        .times(1)
        .returning(|| Ok(json!([{ "id": "1", "title": "Soup" }])));

    let (status, body) = call(
        MockRecipeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/get-recipes"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "result": [{ "id": "1", "title": "Soup" }] }));
}

#[rstest]
#[actix_web::test]
async fn add_recipe_relays_fields_for_token_email() {
    let mut command = MockRecipeCommand::new();
    command
        .expect_add_recipe()
        .withf(|user, recipe| {
            user.email() == "a@x.com"
                && recipe.title == "Soup"
                && recipe.images == ["https://img/1".to_owned()]
        })
        .times(1)
        .returning(|_, _| Ok(()));

    let (status, body) = call(
        command,
        MockRecipeQuery::new(),
        actix_test::TestRequest::post()
            .uri("/add-recipe")
            .insert_header((TOKEN_HEADER, valid_token()))
            .set_json(soup()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "message": "Recipe added successfully" }));
}

#[rstest]
#[case(None)]
#[case(Some("garbage"))]
#[actix_web::test]
async fn protected_routes_reject_bad_tokens_without_calls(
    #[case] token: Option<&'static str>,
    #[values("/add-recipe", "/upvote-recipe")] uri: &str,
) {
    let mut command = MockRecipeCommand::new();
    command.expect_add_recipe().times(0);
    command.expect_upvote_recipe().times(0);

    let mut request = actix_test::TestRequest::post()
        .uri(uri)
        .set_json(json!({ "recipeId": 7, "title": "t", "description": "d", "images": [] }));
    if let Some(token) = token {
        request = request.insert_header((TOKEN_HEADER, token));
    }
    let (status, body) = call(command, MockRecipeQuery::new(), request).await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Invalid token.");
}

#[rstest]
#[actix_web::test]
async fn authentication_is_checked_before_body_validation() {
    let mut command = MockRecipeCommand::new();
    command.expect_add_recipe().times(0);

    let (status, _) = call(
        command,
        MockRecipeQuery::new(),
        actix_test::TestRequest::post()
            .uri("/add-recipe")
            .set_json(json!({ "title": 1 })),
    )
    .await;

    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[rstest]
#[case(None, json!({}))]
#[case(Some(json!({ "id": "7", "title": "Soup" })), json!({ "id": "7", "title": "Soup" }))]
#[actix_web::test]
async fn get_recipe_by_id_returns_recipe_or_empty_object(
    #[case] lookup: Option<Value>,
    #[case] expected: Value,
) {
    let mut query = MockRecipeQuery::new();
    query
        .expect_get_recipe()
        .withf(|id| id.as_str() == "7")
        .times(1)
        .return_once(move |_| Ok(lookup));

    let (status, body) = call(
        MockRecipeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/get-recipe-by-id?recipeId=7"),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "recipe": expected }));
}

#[rstest]
#[actix_web::test]
async fn get_recipe_by_id_requires_recipe_id() {
    let mut query = MockRecipeQuery::new();
    query.expect_get_recipe().times(0);

    let (status, body) = call(
        MockRecipeCommand::new(),
        query,
        actix_test::TestRequest::get().uri("/get-recipe-by-id"),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "invalid_request");
}

#[rstest]
#[case(Ok(()), StatusCode::OK, "Recipe upvoted successfully")]
#[case(
    Err(Error::invalid_request("You cannot upvote your own recipe")),
    StatusCode::BAD_REQUEST,
    "You cannot upvote your own recipe"
)]
#[case(
    Err(Error::invalid_request("You have already upvoted this recipe")),
    StatusCode::BAD_REQUEST,
    "You have already upvoted this recipe"
)]
#[case(Err(Error::unknown()), StatusCode::INTERNAL_SERVER_ERROR, "An unknown error occurred.")]
#[actix_web::test]
async fn upvote_maps_outcomes_to_statuses(
    #[case] outcome: Result<(), Error>,
    #[case] expected_status: StatusCode,
    #[case] expected_message: &str,
) {
    let mut command = MockRecipeCommand::new();
    command
        .expect_upvote_recipe()
        .withf(|user, id| user.email() == "a@x.com" && id.as_str() == "7")
        .times(1)
        .return_once(move |_, _| outcome);

    let (status, body) = call(
        command,
        MockRecipeQuery::new(),
        actix_test::TestRequest::post()
            .uri("/upvote-recipe")
            .insert_header((TOKEN_HEADER, valid_token()))
            .set_json(json!({ "recipeId": 7 })),
    )
    .await;

    assert_eq!(status, expected_status);
    assert_eq!(body["message"], expected_message);
}
