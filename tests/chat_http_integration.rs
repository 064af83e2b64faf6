//! Integration tests for the HTTP API.
//!
//! Each test drives the full router (chat, crisis and health routes plus the
//! shared layers) with `tower::ServiceExt::oneshot`, over an in-memory store,
//! a fixed-key cipher and a scripted generation backend.

use std::sync::Arc;
use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::Router;
use futures::future::join_all;
use http::{Method, Request, StatusCode};
use serde_json::{json, Value};
use tower::ServiceExt;

use solace::adapters::ai::{MockAIProvider, MockError};
use solace::adapters::crypto::TranscriptCipher;
use solace::adapters::http::{app_router, HttpSettings};
use solace::adapters::session_store::InMemorySessionStore;
use solace::application::{ConversationEngine, GeneratorSettings, ResponseGenerator};
use solace::domain::conversation::{StoredMessage, FALLBACK_REPLY, GREETING};
use solace::domain::foundation::{SessionId, Timestamp};
use solace::domain::wellbeing::EmotionalState;
use solace::ports::{MessageCipher, SessionStore};

// =============================================================================
// Test Infrastructure
// =============================================================================

struct TestApp {
    router: Router,
    store: Arc<InMemorySessionStore>,
    cipher: Arc<TranscriptCipher>,
}

fn app_with(provider: Option<MockAIProvider>) -> TestApp {
    app_with_settings(provider, HttpSettings::default())
}

fn app_with_settings(provider: Option<MockAIProvider>, settings: HttpSettings) -> TestApp {
    let store = Arc::new(InMemorySessionStore::new(Duration::from_secs(3600)));
    let cipher = Arc::new(TranscriptCipher::new(1, &[42u8; 32]).unwrap());
    let generator = ResponseGenerator::new(
        provider.map(|p| Arc::new(p) as Arc<dyn solace::ports::AIProvider>),
        GeneratorSettings {
            timeout: Duration::from_millis(500),
            ..GeneratorSettings::default()
        },
    );
    let engine = ConversationEngine::builder(store.clone(), cipher.clone())
        .generator(generator)
        .build();
    TestApp {
        router: app_router(&engine, &settings),
        store,
        cipher,
    }
}

fn app() -> TestApp {
    app_with(None)
}

async fn send(
    router: &Router,
    method: Method,
    uri: &str,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = router.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn start(router: &Router) -> String {
    let (status, body) = send(router, Method::POST, "/api/chat/start", None).await;
    assert_eq!(status, StatusCode::OK);
    body["sessionId"].as_str().unwrap().to_string()
}

async fn message(router: &Router, session_id: &str, text: &str) -> (StatusCode, Value) {
    send(
        router,
        Method::POST,
        "/api/chat/message",
        Some(json!({ "sessionId": session_id, "message": text })),
    )
    .await
}

// =============================================================================
// Session start
// =============================================================================

#[tokio::test]
async fn start_returns_handle_and_greeting() {
    let app = app();
    let (status, body) = send(&app.router, Method::POST, "/api/chat/start", None).await;

    assert_eq!(status, StatusCode::OK);
    let id = body["sessionId"].as_str().unwrap();
    assert_eq!(id.len(), 64);
    assert!(id.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase()));
    assert_eq!(body["message"], GREETING);
    assert_eq!(body["emotionalState"], "neutral");
    assert_eq!(
        body["suggestions"],
        json!(["Mood check-in", "Share your thoughts", "Wellness tips"])
    );
    assert!(body["timestamp"].is_string());

    let session: SessionId = id.parse().unwrap();
    assert_eq!(app.store.get(&session).await.unwrap(), Some(vec![]));
}

// =============================================================================
// Messages
// =============================================================================

#[tokio::test]
async fn message_round_trip_persists_ciphertext() {
    let app = app_with(Some(MockAIProvider::new().with_reply("That sounds wonderful.")));
    let id = start(&app.router).await;

    let (status, body) = message(&app.router, &id, "I feel happy and better").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["sessionId"], id.as_str());
    assert_eq!(body["message"], "That sounds wonderful.");
    assert_eq!(body["emotionalState"], "positive");
    assert!(body.get("crisisDetected").is_none());
    assert!(body.get("crisisResources").is_none());

    let session: SessionId = id.parse().unwrap();
    let transcript = app.store.get(&session).await.unwrap().unwrap();
    assert_eq!(transcript.len(), 2);
    assert!(!transcript[0].ciphertext.contains("happy"));
    assert_eq!(
        app.cipher.decrypt(&transcript[0].ciphertext).unwrap(),
        "I feel happy and better"
    );
}

#[tokio::test]
async fn crisis_message_includes_resources() {
    let app = app();
    let id = start(&app.router).await;

    let (status, body) = message(&app.router, &id, "I want to kill myself").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["crisisDetected"], true);
    assert_eq!(body["crisisResources"]["helpline"], "1800-599-0019");
    assert_eq!(
        body["crisisResources"]["immediateSupport"],
        json!(["KIRAN Mental Health Helpline: 1800-599-0019", "iCall: 022-25521111"])
    );
    assert!(!body["message"].as_str().unwrap().is_empty());

    let uri = format!("/api/chat/history/{id}");

    let (_, history) = send(&app.router, Method::GET, &uri, None).await;
    assert_eq!(history["messages"][1]["role"], "crisis");
}

#[tokio::test]
async fn backend_failure_degrades_to_fallback() {
    let app = app_with(Some(MockAIProvider::new().with_failure(MockError::Unavailable {
        message: "down".into(),
    })));
    let id = start(&app.router).await;

    let (status, body) = message(&app.router, &id, "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], FALLBACK_REPLY);
    assert_eq!(body["suggestions"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn slow_backend_is_bounded() {
    let app = app_with(Some(
        MockAIProvider::new()
            .with_reply("late")
            .with_delay(Duration::from_secs(10)),
    ));
    let id = start(&app.router).await;

    let started = std::time::Instant::now();
    let (status, body) = message(&app.router, &id, "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert!(started.elapsed() < Duration::from_secs(5));
    assert_eq!(body["message"], FALLBACK_REPLY);
}

#[tokio::test]
async fn slow_backend_falls_back_inside_request_timeout() {
    // Generation is bounded at 500ms, the request layer at 2s.
    let app = app_with_settings(
        Some(
            MockAIProvider::new()
                .with_reply("late")
                .with_delay(Duration::from_secs(10)),
        ),
        HttpSettings {
            request_timeout: Duration::from_secs(2),
            ..HttpSettings::default()
        },
    );
    let id = start(&app.router).await;

    let (status, body) = message(&app.router, &id, "hello").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], FALLBACK_REPLY);
    assert_eq!(body["sessionId"], id);
}

#[tokio::test]
async fn validation_failures_are_400() {
    let app = app();
    let id = start(&app.router).await;

    let cases = vec![
        json!({ "sessionId": id, "message": "" }),
        json!({ "sessionId": id, "message": "   " }),
        json!({ "sessionId": id, "message": "x".repeat(1001) }),
        json!({ "sessionId": id }),
        json!({ "message": "hello" }),
        json!({ "sessionId": "not-a-handle", "message": "hello" }),
    ];

    for case in cases {
        let (status, body) =
            send(&app.router, Method::POST, "/api/chat/message", Some(case.clone())).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "case: {case}");
        assert_eq!(body["error"], "VALIDATION_FAILED", "case: {case}");
        assert!(body["message"].is_string());
    }
}

#[tokio::test]
async fn malformed_json_is_400() {
    let app = app();
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/chat/message")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();

    let response = app.router.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn exactly_1000_characters_is_accepted() {
    let app = app();
    let id = start(&app.router).await;

    let (status, _) = message(&app.router, &id, &"a".repeat(1000)).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn concurrent_messages_keep_pairs_contiguous() {
    let app = app();
    let id = start(&app.router).await;

    let texts: Vec<String> = (0..8).map(|n| format!("message {n}")).collect();
    let results = join_all(texts.iter().map(|t| message(&app.router, &id, t))).await;
    assert!(results.iter().all(|(status, _)| *status == StatusCode::OK));

    let uri = format!("/api/chat/history/{id}");

    let (_, body) = send(&app.router, Method::GET, &uri, None).await;
    let messages = body["messages"].as_array().unwrap();
    assert_eq!(messages.len(), 16);
    for pair in messages.chunks(2) {
        assert_eq!(pair[0]["role"], "user");
        assert_eq!(pair[1]["role"], "assistant");
    }
}

// =============================================================================
// History
// =============================================================================

#[tokio::test]
async fn history_returns_turns_in_order() {
    let app = app_with(Some(
        MockAIProvider::new().with_reply("reply one").with_reply("reply two"),
    ));
    let id = start(&app.router).await;
    message(&app.router, &id, "first").await;
    message(&app.router, &id, "second").await;

    let uri = format!("/api/chat/history/{id}");

    let (status, body) = send(&app.router, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    let contents: Vec<&str> = body["messages"]
        .as_array()
        .unwrap()
        .iter()
        .map(|m| m["content"].as_str().unwrap())
        .collect();
    assert_eq!(contents, vec!["first", "reply one", "second", "reply two"]);
    assert_eq!(body["messages"][0]["role"], "user");
    assert_eq!(body["messages"][0]["contentStatus"], "decrypted");
    assert!(body["messages"][0]["emotionalState"].is_string());
    assert!(body["messages"][1]["suggestions"].is_array());
}

#[tokio::test]
async fn history_flags_legacy_and_unverified_entries() {
    let app = app();
    let id = start(&app.router).await;
    let session: SessionId = id.parse().unwrap();
    let now = Timestamp::now();
    app.store
        .append(
            &session,
            vec![
                StoredMessage::user(
                    "stored before encryption".into(),
                    EmotionalState::Neutral,
                    now,
                ),
                StoredMessage::reply("00:11:22".into(), vec![], false, now),
            ],
        )
        .await
        .unwrap();

    let uri = format!("/api/chat/history/{id}");

    let (status, body) = send(&app.router, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"][0]["contentStatus"], "legacy");
    assert_eq!(body["messages"][0]["content"], "stored before encryption");
    assert_eq!(body["messages"][1]["contentStatus"], "unverified");
    assert_eq!(body["messages"][1]["content"], "00:11:22");
}

#[tokio::test]
async fn unknown_session_history_is_empty() {
    let app = app();
    let id = SessionId::generate().unwrap();

    let uri = format!("/api/chat/history/{id}");

    let (status, body) = send(&app.router, Method::GET, &uri, None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["messages"], json!([]));
}

#[tokio::test]
async fn malformed_history_handle_is_400() {
    let app = app();
    let (status, body) = send(&app.router, Method::GET, "/api/chat/history/abc", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn delete_is_idempotent_and_clears_history() {
    let app = app();
    let id = start(&app.router).await;
    message(&app.router, &id, "hello").await;

    for _ in 0..2 {
        let (status, body) =
            send(&app.router, Method::DELETE, &format!("/api/chat/history/{id}"), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["message"], "Conversation history deleted successfully");
        assert_eq!(body["sessionId"], id.as_str());
    }

    let uri = format!("/api/chat/history/{id}");

    let (_, body) = send(&app.router, Method::GET, &uri, None).await;
    assert_eq!(body["messages"], json!([]));
}

// =============================================================================
// Crisis assessment and health
// =============================================================================

#[tokio::test]
async fn crisis_assessment_returns_level_and_guidance() {
    let app = app();
    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/crisis/assess",
        Some(json!({ "message": "I want to kill myself and I have a plan" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let level = body["assessment"]["level"].as_str().unwrap();
    assert!(level == "high" || level == "critical", "level was {level}");
    assert_eq!(body["assessment"]["indicators"]["keywordMatch"], true);
    assert_eq!(body["response"]["immediate"], true);
    assert!(body["response"]["actions"].as_array().unwrap().len() >= 3);
    assert!(body["response"]["followUp"].is_string());
    assert!(body.get("sessionId").is_none());
}

#[tokio::test]
async fn crisis_assessment_echoes_session_and_honours_state() {
    let app = app();
    let id = start(&app.router).await;

    let (status, body) = send(
        &app.router,
        Method::POST,
        "/api/crisis/assess",
        Some(json!({ "message": "hello", "emotionalState": "very_negative", "sessionId": id })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["assessment"]["level"], "moderate");
    assert_eq!(body["response"]["priority"], "medium");
    assert_eq!(body["sessionId"], id.as_str());
}

#[tokio::test]
async fn crisis_assessment_requires_message() {
    let app = app();
    let (status, body) =
        send(&app.router, Method::POST, "/api/crisis/assess", Some(json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "VALIDATION_FAILED");
}

#[tokio::test]
async fn health_reports_store_backend() {
    let app = app();
    let (status, body) = send(&app.router, Method::GET, "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["store"], "memory");
    assert!(body["version"].is_string());
}

#[tokio::test]
async fn unknown_route_is_404_json() {
    let app = app();
    let (status, body) = send(&app.router, Method::GET, "/api/nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], "NOT_FOUND");
}
