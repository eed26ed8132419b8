//! End-to-end behaviour of the HTTP surface over a scripted chain.
//!
//! Requests flow through the real dispatcher, session tokens and middleware;
//! only the chain itself is replaced by a recording double.
use std::sync::{Arc, Mutex};

use actix_cors::Cors;
use actix_web::http::{StatusCode, header};
use actix_web::{App, test, web};
use async_trait::async_trait;
use rstest::{fixture, rstest};
use serde_json::{Value, json};

use recipe_gateway::Trace;
use recipe_gateway::domain::ports::{ChainClient, ChainClientError};
use recipe_gateway::domain::{
    AccountAddress, CommittedTransaction, ContractFunction, EntryFunctionCall,
    RecipeGatewayService, TRACE_ID_HEADER,
};
use recipe_gateway::inbound::http::appreciations::get_all_appreciations;
use recipe_gateway::inbound::http::error::{json_error_handler, query_error_handler};
use recipe_gateway::inbound::http::recipes::{
    add_recipe, get_recipe_by_id, get_recipes, upvote_recipe,
};
use recipe_gateway::inbound::http::session::{SessionTokens, TOKEN_HEADER};
use recipe_gateway::inbound::http::state::HttpState;
use recipe_gateway::inbound::http::users::login;

const SECRET: &[u8] = b"integration-secret";

#[derive(Default)]
struct ScriptedChain {
    calls: Mutex<Vec<EntryFunctionCall>>,
    write_abort: Option<String>,
    view_values: Vec<Value>,
}

impl ScriptedChain {
    fn aborting(vm_status: &str) -> Self {
        Self {
            write_abort: Some(vm_status.to_owned()),
            ..Self::default()
        }
    }

    fn viewing(values: Vec<Value>) -> Self {
        Self {
            view_values: values,
            ..Self::default()
        }
    }

    fn recorded(&self) -> Vec<EntryFunctionCall> {
        self.calls.lock().expect("calls lock").clone()
    }
}

#[async_trait]
impl ChainClient for ScriptedChain {
    fn signer_address(&self) -> AccountAddress {
        AccountAddress::parse("0xbeef").expect("signer")
    }

    async fn submit_and_wait(
        &self,
        call: &EntryFunctionCall,
    ) -> Result<CommittedTransaction, ChainClientError> {
        self.calls.lock().expect("calls lock").push(call.clone());
        match &self.write_abort {
            Some(status) => Err(ChainClientError::aborted("0xabc", status.clone())),
            None => Ok(CommittedTransaction {
                hash: "0xabc".to_owned(),
            }),
        }
    }

    async fn view(&self, call: &EntryFunctionCall) -> Result<Vec<Value>, ChainClientError> {
        self.calls.lock().expect("calls lock").push(call.clone());
        Ok(self.view_values.clone())
    }
}

#[fixture]
fn tokens() -> SessionTokens {
    SessionTokens::new(SECRET, None)
}

fn state_for(chain: Arc<ScriptedChain>) -> web::Data<HttpState> {
    let contract = AccountAddress::parse("0xcafe").expect("contract");
    let service = Arc::new(RecipeGatewayService::new(chain, contract));
    web::Data::new(HttpState::new(
        service.clone(),
        service,
        Arc::new(SessionTokens::new(SECRET, None)),
    ))
}

macro_rules! gateway_app {
    ($state:expr) => {
        test::init_service(
            App::new()
                .app_data($state)
                .app_data(web::JsonConfig::default().error_handler(json_error_handler))
                .app_data(web::QueryConfig::default().error_handler(query_error_handler))
                .wrap(Cors::permissive())
                .wrap(Trace)
                .service(login)
                .service(get_recipes)
                .service(add_recipe)
                .service(get_recipe_by_id)
                .service(get_all_appreciations)
                .service(upvote_recipe),
        )
        .await
    };
}

async fn login_token(state: web::Data<HttpState>) -> String {
    let app = gateway_app!(state);
    let request = test::TestRequest::post()
        .uri("/login")
        .set_json(json!({ "email": "a@x.com", "name": "A" }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;
    body["token"].as_str().expect("token").to_owned()
}

#[rstest]
#[actix_web::test]
async fn login_issues_a_token_for_the_submitted_identity(tokens: SessionTokens) {
    let chain = Arc::new(ScriptedChain::default());
    let token = login_token(state_for(chain.clone())).await;

    let claims = tokens.decode(&token).expect("token decodes");
    assert_eq!(claims.email, "a@x.com");
    assert_eq!(claims.name, "A");

    let calls = chain.recorded();
    assert_eq!(calls.len(), 1);
    assert_eq!(calls[0].function(), ContractFunction::LoginUser);
    assert_eq!(calls[0].arguments(), [json!("a@x.com"), json!("A")]);
}

#[rstest]
#[actix_web::test]
async fn repeated_login_of_a_registered_user_succeeds() {
    let chain = Arc::new(ScriptedChain::aborting(
        "Move abort in 0xcafe::recipes: 0x28",
    ));
    let token = login_token(state_for(chain)).await;
    assert!(!token.is_empty());
}

#[rstest]
#[case(None)]
#[case(Some("not-a-jwt"))]
#[actix_web::test]
async fn protected_routes_reject_bad_tokens_without_touching_the_chain(
    #[case] token: Option<&str>,
) {
    let chain = Arc::new(ScriptedChain::default());
    let app = gateway_app!(state_for(chain.clone()));

    let mut request = test::TestRequest::post()
        .uri("/add-recipe")
        .set_json(json!({ "title": "Soup", "description": "Hot", "images": [] }));
    if let Some(value) = token {
        request = request.insert_header((TOKEN_HEADER, value));
    }
    let response = test::call_service(&app, request.to_request()).await;

    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["code"], "unauthorized");
    assert_eq!(body["message"], "Invalid token.");
    assert!(chain.recorded().is_empty());
}

#[rstest]
#[actix_web::test]
async fn add_recipe_relays_the_authenticated_email() {
    let chain = Arc::new(ScriptedChain::default());
    let token = login_token(state_for(chain.clone())).await;
    let app = gateway_app!(state_for(chain.clone()));

    let request = test::TestRequest::post()
        .uri("/add-recipe")
        .insert_header((TOKEN_HEADER, token))
        .set_json(json!({ "title": "Soup", "description": "Hot", "images": ["i1"] }))
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "message": "Recipe added successfully" }));
    let calls = chain.recorded();
    let last = calls.last().expect("add_recipe call");
    assert_eq!(last.function(), ContractFunction::AddRecipe);
    assert_eq!(
        last.arguments(),
        [json!("Soup"), json!("Hot"), json!(["i1"]), json!("a@x.com")]
    );
}

#[rstest]
#[case("Move abort in 0xcafe::recipes: 0x28", StatusCode::BAD_REQUEST, "You cannot upvote your own recipe")]
#[case("Move abort in 0xcafe::recipes: 0x29", StatusCode::BAD_REQUEST, "You have already upvoted this recipe")]
#[case("OUT_OF_GAS", StatusCode::INTERNAL_SERVER_ERROR, "An unknown error occurred.")]
#[actix_web::test]
async fn upvote_aborts_map_to_client_messages(
    tokens: SessionTokens,
    #[case] vm_status: &str,
    #[case] status: StatusCode,
    #[case] message: &str,
) {
    let chain = Arc::new(ScriptedChain::aborting(vm_status));
    let app = gateway_app!(state_for(chain));
    let token = tokens
        .issue(&recipe_gateway::domain::Identity::new("a@x.com", "A"))
        .expect("token");

    let request = test::TestRequest::post()
        .uri("/upvote-recipe")
        .insert_header((TOKEN_HEADER, token))
        .set_json(json!({ "recipeId": 3 }))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), status);
    let body: Value = test::read_body_json(response).await;
    assert_eq!(body["message"], message);
}

#[rstest]
#[case(json!({ "vec": [] }), json!({}))]
#[case(json!({ "vec": [{ "id": "3", "title": "Soup" }] }), json!({ "id": "3", "title": "Soup" }))]
#[actix_web::test]
async fn recipe_lookup_returns_first_element_or_empty_object(
    #[case] view: Value,
    #[case] expected: Value,
) {
    let chain = Arc::new(ScriptedChain::viewing(vec![view]));
    let app = gateway_app!(state_for(chain.clone()));

    let request = test::TestRequest::get()
        .uri("/get-recipe-by-id?recipeId=3")
        .to_request();
    let body: Value = test::call_and_read_body_json(&app, request).await;

    assert_eq!(body, json!({ "recipe": expected }));
    let calls = chain.recorded();
    assert_eq!(calls[0].arguments(), [json!("0xbeef"), json!("3")]);
}

#[rstest]
#[actix_web::test]
async fn listings_relay_view_results() {
    let recipes = json!([{ "id": "1" }, { "id": "2" }]);
    let chain = Arc::new(ScriptedChain::viewing(vec![recipes.clone(), json!("extra")]));
    let app = gateway_app!(state_for(chain));

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get().uri("/get-recipes").to_request(),
    )
    .await;
    assert_eq!(body, json!({ "result": recipes }));

    let body: Value = test::call_and_read_body_json(
        &app,
        test::TestRequest::get()
            .uri("/get-all-appreciations")
            .to_request(),
    )
    .await;
    assert_eq!(body, json!({ "result": [recipes, "extra"] }));
}

#[rstest]
#[actix_web::test]
async fn cross_origin_requests_are_allowed() {
    let app = gateway_app!(state_for(Arc::new(ScriptedChain::viewing(vec![json!([])]))));
    let request = test::TestRequest::get()
        .uri("/get-recipes")
        .insert_header((header::ORIGIN, "https://recipes.example"))
        .to_request();
    let response = test::call_service(&app, request).await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
    assert!(response.headers().contains_key(TRACE_ID_HEADER));
}
