use crate::e2e::helpers;

use base64::{engine::general_purpose::STANDARD, Engine as _};
use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

fn recording() -> String {
    STANDARD.encode(b"RIFF\x24\x00\x00\x00WAVEfmt fake-pcm")
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_assess_thai_pronunciation(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/pronunciation",
            &json!({ "referenceText": "สวัสดีครับ", "audioData": recording() }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);

    let assessment = &body["assessment"];
    assert_eq!(assessment["accuracyScore"], 92.0);
    assert_eq!(assessment["pronScore"], 88.4);
    // Prosody is only scored for English
    assert!(assessment["prosodyScore"].is_null());
    assert_eq!(assessment["detailedResults"][0]["word"], "สวัสดีครับ");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_keep_prosody_for_english(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/pronunciation",
            &json!({
                "referenceText": "Good morning",
                "audioData": format!("data:audio/wav;base64,{}", recording()),
                "language": "en-US"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["assessment"]["prosodyScore"], 78.5);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_fields(ctx: &TestContext) {
    let response = ctx
        .client
        .post("/api/pronunciation", &json!({ "referenceText": "สวัสดีครับ" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("Missing required fields");
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_undecodable_audio(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/pronunciation",
            &json!({ "referenceText": "สวัสดีครับ", "audioData": "%%% not base64 %%%" }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_unsupported_language(ctx: &TestContext) {
    let response = ctx
        .client
        .post(
            "/api/pronunciation",
            &json!({
                "referenceText": "Guten Morgen",
                "audioData": recording(),
                "language": "de-DE"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("de-DE");
}
