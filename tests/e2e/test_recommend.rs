use crate::e2e::helpers;

use helpers::TestContext;
use hyper::StatusCode;
use serde_json::json;
use test_context::test_context;

fn batch(pairs: &[(&str, &str)]) -> String {
    let items: Vec<_> = pairs
        .iter()
        .map(|(thai, english)| json!({ "Thai": thai, "English": english }))
        .collect();
    json!({ "recommendations": items }).to_string()
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_three_recommendations(ctx: &TestContext) {
    ctx.completion.push_reply(batch(&[
        ("เอาหนึ่งจานครับ", "One plate, please."),
        ("ไม่เผ็ดได้ไหมครับ", "Can you make it not spicy?"),
        ("ใส่ไข่ดาวด้วยครับ", "Add a fried egg too."),
    ]));

    let response = ctx
        .client
        .post(
            "/api/recommend",
            &json!({
                "response": "ผัดกะเพรา 50 บาทครับ (Pad kra pao is 50 baht)",
                "sourceUtteranceId": "msg_12"
            }),
        )
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);

    let recommendations = body["recommendations"].as_array().unwrap();
    assert_eq!(recommendations.len(), 3);
    assert_eq!(recommendations[0]["nativeText"], "เอาหนึ่งจานครับ");
    assert_eq!(recommendations[0]["translatedText"], "One plate, please.");
    for candidate in recommendations {
        assert_eq!(candidate["sourceUtteranceId"], "msg_12");
        assert!(uuid::Uuid::parse_str(candidate["id"].as_str().unwrap()).is_ok());
    }

    let requests = ctx.completion.requests();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].user_prompt.contains("ผัดกะเพรา 50 บาทครับ"));
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_retry_once_when_batch_is_short(ctx: &TestContext) {
    ctx.completion
        .push_reply(batch(&[("เอาหนึ่งจานครับ", "One plate, please.")]));
    ctx.completion.push_reply(batch(&[
        ("ไม่เผ็ดได้ไหมครับ", "Can you make it not spicy?"),
        ("ใส่ไข่ดาวด้วยครับ", "Add a fried egg too."),
    ]));

    let response = ctx
        .client
        .post("/api/recommend", &json!({ "response": "ผัดกะเพรา 50 บาทครับ" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["recommendations"].as_array().unwrap().len(), 3);
    assert_eq!(ctx.completion.requests().len(), 2);
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_return_empty_list_when_model_keeps_failing(ctx: &TestContext) {
    ctx.completion.push_reply("I can't do that.");
    ctx.completion
        .push_reply(batch(&[("เอาหนึ่งจานครับ", "One plate, please.")]));

    let response = ctx
        .client
        .post("/api/recommend", &json!({ "response": "ผัดกะเพรา 50 บาทครับ" }))
        .await
        .unwrap();

    response.assert_status(StatusCode::OK);

    let body = response.body.as_ref().unwrap();
    assert_eq!(body["success"], true);
    assert!(body["recommendations"].as_array().unwrap().is_empty());
}

#[test_context(TestContext)]
#[tokio::test]
async fn it_should_reject_missing_response(ctx: &TestContext) {
    let response = ctx.client.post("/api/recommend", &json!({})).await.unwrap();

    response.assert_status(StatusCode::BAD_REQUEST);
    response.assert_error_message("Response is required");
    assert!(ctx.completion.requests().is_empty());
}
