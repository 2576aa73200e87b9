use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_register_a_new_user(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/users", &json!({ "tgId": "555001", "name": "Mali" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["user"]["tgId"], "555001");
    assert_eq!(body["user"]["name"], "Mali");
    assert!(body["user"]["assistantId"].is_null());
    assert!(uuid::Uuid::parse_str(body["user"]["id"].as_str().unwrap()).is_ok());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_update_name_for_existing_tg_id(ctx: &TestContext) {
    let first = ctx
        .client
        .post("/api/users", &json!({ "tgId": "555002", "name": "Joe" }))
        .await
        .unwrap();
    let second = ctx
        .client
        .post("/api/users", &json!({ "tgId": "555002", "name": "Joey" }))
        .await
        .unwrap();

    second.assert_status(StatusCode::OK);

    let first = first.body.as_ref().unwrap();
    let second = second.body.as_ref().unwrap();
    assert_eq!(first["user"]["id"], second["user"]["id"]);
    assert_eq!(second["user"]["name"], "Joey");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_find_user_by_tg_id(ctx: &TestContext) {
    let user = ctx.create_user("555003", "Fon").await;

    let response = ctx.client.get("/api/users/555003").await.unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["user"]["id"], user.id.to_string().as_str());
    assert_eq!(body["user"]["name"], "Fon");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_404_for_unknown_tg_id(ctx: &TestContext) {
    let response = ctx.client.get("/api/users/999999").await.unwrap();

    response.assert_status(StatusCode::NOT_FOUND);
    response.assert_error_message("User not found");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_name(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/users", &json!({ "tgId": "555004" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("tgId and name are required");
}
