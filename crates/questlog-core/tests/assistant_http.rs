//! HTTP contract tests for the Gemini client and the coach fallbacks.

use mockito::Matcher;
use questlog_core::assistant::{
    Coach, GeminiClient, GenerationRequest, MotivationInput, TextGenerator, MOTIVATION_FALLBACK,
    TIP_FALLBACK,
};
use questlog_core::AssistantError;
use serde_json::json;
use std::time::Duration;

const PATH: &str = "/v1beta/models/test-model:generateContent";

fn client(url: &str) -> GeminiClient {
    GeminiClient::new(url, "test-model", "secret", Duration::from_secs(5)).unwrap()
}

fn reply(text: &str) -> String {
    json!({
        "candidates": [{ "content": { "role": "model", "parts": [{ "text": text }] } }]
    })
    .to_string()
}

#[tokio::test]
async fn test_generate_sends_prompt_and_key() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_header("x-goog-api-key", "secret")
        .match_body(Matcher::PartialJson(json!({
            "contents": [{ "parts": [{ "text": "hello" }] }]
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply("Hi there"))
        .create_async()
        .await;

    let text = client(&server.url())
        .generate(&GenerationRequest::text("hello"))
        .await
        .unwrap();
    assert_eq!(text, "Hi there");
    mock.assert_async().await;
}

#[tokio::test]
async fn test_http_error_is_reported() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(429)
        .with_body("quota exceeded")
        .create_async()
        .await;

    let err = client(&server.url())
        .generate(&GenerationRequest::text("hello"))
        .await
        .unwrap_err();
    match err {
        AssistantError::Http { status, body } => {
            assert_eq!(status, 429);
            assert_eq!(body, "quota exceeded");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn test_subtask_breakdown_over_http() {
    let mut server = mockito::Server::new_async().await;
    let mock = server
        .mock("POST", PATH)
        .match_body(Matcher::PartialJson(json!({
            "generationConfig": { "responseMimeType": "application/json" }
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(reply(r#"["Gather data", "Draft outline", "Write summary"]"#))
        .create_async()
        .await;

    let coach = Coach::new(client(&server.url()));
    let steps = coach.suggest_subtasks("Write report").await;
    assert_eq!(steps, vec!["Gather data", "Draft outline", "Write summary"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_coach_falls_back_on_server_errors() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(500)
        .expect_at_least(1)
        .create_async()
        .await;

    let coach = Coach::new(client(&server.url()));
    let input = MotivationInput {
        completed_tasks: 0,
        completed_habits: 0,
        pending_tasks: 4,
    };
    assert_eq!(coach.motivation(&input).await, MOTIVATION_FALLBACK);
    assert_eq!(coach.productivity_tip("Deep Work").await, TIP_FALLBACK);
    assert!(coach.suggest_subtasks("Write report").await.is_empty());
}

#[tokio::test]
async fn test_coach_falls_back_on_empty_text() {
    let mut server = mockito::Server::new_async().await;
    let _mock = server
        .mock("POST", PATH)
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"candidates":[{"content":{"parts":[]}}]}"#)
        .create_async()
        .await;

    let coach = Coach::new(client(&server.url()));
    assert_eq!(coach.productivity_tip("Energy Management").await, TIP_FALLBACK);
}

#[tokio::test]
async fn test_unreachable_service_falls_back() {
    // Nothing listens on the discard port.
    let coach = Coach::new(client("http://127.0.0.1:9"));
    assert_eq!(coach.productivity_tip("Procrastination").await, TIP_FALLBACK);
}
