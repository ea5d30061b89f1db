//! Full-stack tests: real providers against a wiremock upstream.

mod common;

use common::{test_config, TestApp, TEST_BOT_TOKEN, TEST_CHAT_ID};
use serde_json::{json, Value};
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

const GENERATE_PATH: &str = "/models/gemini-2.0-flash:generateContent";

#[tokio::test]
async fn scan_relays_gemini_response() {
    let upstream = MockServer::start().await;
    let gemini_body = json!({
        "candidates": [{"content": {"parts": [{"text": "[{\"type\":\"error\",\"severity\":\"low\"}]"}]}}]
    });
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .and(header("x-goog-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = TestApp::spawn(test_config(&upstream.uri(), false)).await;

    let response = app
        .post_json("/scan", &json!({"filename": "a.py", "content": "print(1)"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, gemini_body);
}

#[tokio::test]
async fn scan_reports_gemini_error_message() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(403).set_body_json(json!({
            "error": {"code": 403, "message": "API key not valid", "status": "PERMISSION_DENIED"}
        })))
        .mount(&upstream)
        .await;

    let app = TestApp::spawn(test_config(&upstream.uri(), false)).await;

    let response = app
        .post_json("/scan", &json!({"filename": "a.py", "content": "x"}))
        .await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body["detail"],
        "Failed to analyze code with Gemini: Gemini API error: API key not valid"
    );
}

#[tokio::test]
async fn notify_posts_to_bot_api() {
    let upstream = MockServer::start().await;
    let telegram_body = json!({"ok": true, "result": {"message_id": 7}});
    Mock::given(method("POST"))
        .and(path(format!("/bot{}/sendMessage", TEST_BOT_TOKEN)))
        .and(body_partial_json(json!({
            "chat_id": TEST_CHAT_ID,
            "text": "build green",
            "parse_mode": "HTML"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(telegram_body.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = TestApp::spawn(test_config(&upstream.uri(), true)).await;

    let response = app
        .post_json("/notify", &json!({"message": "build green"}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(
        body,
        json!({
            "status": "sent",
            "message": "Notification sent successfully",
            "telegram_response": telegram_body
        })
    );
}

#[tokio::test]
async fn notify_without_telegram_config_fails_without_upstream_call() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = TestApp::spawn(test_config(&upstream.uri(), false)).await;

    let response = app.post_json("/notify", &json!({"message": "hi"})).await;

    assert_eq!(response.status().as_u16(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["detail"]
        .as_str()
        .unwrap()
        .contains("Telegram configuration missing"));
}

#[tokio::test]
async fn coverage_with_empty_lists_never_reaches_gemini() {
    let upstream = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&upstream)
        .await;

    let app = TestApp::spawn(test_config(&upstream.uri(), false)).await;

    let response = app
        .post_json("/coverage", &json!({"sourceFiles": [], "testFiles": []}))
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["candidates"][0]["content"]["parts"][0]["text"], "0");
}

#[tokio::test]
async fn coverage_relays_gemini_estimate() {
    let upstream = MockServer::start().await;
    let gemini_body = json!({"candidates": [{"content": {"parts": [{"text": "72"}]}}]});
    Mock::given(method("POST"))
        .and(path(GENERATE_PATH))
        .respond_with(ResponseTemplate::new(200).set_body_json(gemini_body.clone()))
        .expect(1)
        .mount(&upstream)
        .await;

    let app = TestApp::spawn(test_config(&upstream.uri(), false)).await;

    let response = app
        .post_json(
            "/coverage",
            &json!({
                "sourceFiles": [{"name": "lib.rs", "content": "pub fn f() {}"}],
                "testFiles": [{"name": "t.rs", "content": "#[test] fn t() { f() }"}]
            }),
        )
        .await;

    assert_eq!(response.status().as_u16(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body, gemini_body);
}
