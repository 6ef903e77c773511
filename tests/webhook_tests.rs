//! Webhook server integration tests
//!
//! Spin the real axum router on an ephemeral port and drive it over
//! HTTP, with wiremock standing in for the Box and OpenAI APIs.

use std::sync::Arc;

use box_video_skill::application::ProcessFileUseCase;
use box_video_skill::domain::config::CardSelection;
use box_video_skill::infrastructure::{
    BoxFileStore, FfmpegAudioExtractor, OpenAiAnalyzer, WhisperTranscriber,
};
use box_video_skill::server::{build_router, AppState};
use serde_json::{json, Value};
use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

/// Start the service against the given upstream base URLs and return
/// its address.
async fn spawn_app(box_url: &str, openai_url: &str) -> String {
    let use_case = ProcessFileUseCase::new(
        BoxFileStore::with_base_url(box_url),
        FfmpegAudioExtractor::new(),
        WhisperTranscriber::new("sk-test").with_base_url(openai_url),
        OpenAiAnalyzer::new("sk-test").with_base_url(openai_url),
        CardSelection::default(),
    );
    let state = Arc::new(AppState::new(use_case));
    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let address = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });

    format!("http://{}", address)
}

/// Service with unreachable upstreams, for request-validation tests
async fn spawn_bare_app() -> String {
    spawn_app("http://127.0.0.1:1", "http://127.0.0.1:1").await
}

#[tokio::test]
async fn health_endpoint_reports_healthy() {
    let app = spawn_bare_app().await;

    let response = reqwest::get(&app).await.unwrap();
    assert_eq!(response.status(), 200);

    let body: Value = response.json().await.unwrap();
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn webhook_rejects_missing_file_id() {
    let app = spawn_bare_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/webhook", app))
        .json(&json!({
            "token": {"read": {"access_token": "r"}}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing file ID");
}

#[tokio::test]
async fn webhook_rejects_missing_token() {
    let app = spawn_bare_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/webhook", app))
        .json(&json!({
            "source": {"id": "200000", "name": "talk.mp3"}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Missing token");
}

#[tokio::test]
async fn webhook_rejects_token_without_read_grant() {
    let app = spawn_bare_app().await;

    let response = reqwest::Client::new()
        .post(format!("{}/webhook", app))
        .json(&json!({
            "source": {"id": "200000", "name": "talk.mp3"},
            "token": {"write": {"access_token": "w"}}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 400);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["error"], "Invalid token format");
}

#[tokio::test]
async fn webhook_processes_file_end_to_end() {
    let file_id = "200001";
    let box_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/files/{}/content", file_id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake-audio".to_vec()))
        .mount(&box_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "text": "Hello world.",
            "segments": [{"start": 0.0, "end": 2.0, "text": "Hello world."}]
        })))
        .mount(&openai_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{"message": {"role": "assistant", "content": "hello, world"}}]
        })))
        .mount(&openai_server)
        .await;

    let cards_path = format!("/files/{}/metadata/global/boxSkillsCards", file_id);
    Mock::given(method("GET"))
        .and(path(cards_path.clone()))
        .respond_with(ResponseTemplate::new(404))
        .mount(&box_server)
        .await;

    Mock::given(method("POST"))
        .and(path(cards_path))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&box_server)
        .await;

    let app = spawn_app(&box_server.uri(), &openai_server.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/webhook", app))
        .json(&json!({
            "source": {"id": file_id, "name": "Meeting.MP3"},
            "token": {
                "read": {"access_token": "read-token"},
                "write": {"access_token": "write-token"}
            }
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 200);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["message"], "Processing completed successfully");
}

#[tokio::test]
async fn webhook_reports_processing_failure() {
    let file_id = "200002";
    let box_server = MockServer::start().await;
    let openai_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(format!("/files/{}/content", file_id)))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(b"fake-audio".to_vec()))
        .mount(&box_server)
        .await;

    Mock::given(method("POST"))
        .and(path("/audio/transcriptions"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&openai_server)
        .await;

    let cards_path = format!("/files/{}/metadata/global/boxSkillsCards", file_id);
    Mock::given(method("GET"))
        .and(path(cards_path.clone()))
        .respond_with(ResponseTemplate::new(404))
        .mount(&box_server)
        .await;

    // The error card is still uploaded before the 500 is returned
    Mock::given(method("POST"))
        .and(path(cards_path))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&box_server)
        .await;

    let app = spawn_app(&box_server.uri(), &openai_server.uri()).await;

    let response = reqwest::Client::new()
        .post(format!("{}/webhook", app))
        .json(&json!({
            "source": {"id": file_id, "name": "talk.mp3"},
            "token": {"read": {"access_token": "r"}}
        }))
        .send()
        .await
        .unwrap();

    assert_eq!(response.status(), 500);
    let body: Value = response.json().await.unwrap();
    assert!(body["error"]
        .as_str()
        .unwrap()
        .contains("Failed to transcribe audio"));
}
