use std::collections::HashSet;
use std::env;

use authoring_backend::{routes, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value as JsonValue};
use tower::ServiceExt;

fn init_test_config() {
    dotenvy::dotenv().ok();
    env::set_var("SERVER_ADDRESS", "127.0.0.1:0");
    env::set_var("JWT_SECRET", "test_secret_key");
    env::set_var("TOKEN_TTL_MINUTES", "60");
    env::set_var("PUBLIC_RPS", "100");
    env::set_var("INTEGRATION_RPS", "100");
    let _ = authoring_backend::config::init_config();
}

fn question_router(state: AppState) -> Router {
    Router::new()
        .route(
            "/api/questions/generate",
            post(routes::questions::generate_questions),
        )
        .route(
            "/api/questions",
            get(routes::questions::list_saved_questions).post(routes::questions::save_questions),
        )
        .with_state(state)
}

async fn post_json(app: &Router, uri: &str, body: JsonValue) -> (StatusCode, JsonValue) {
    let req = Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 16 * 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

#[tokio::test]
async fn generate_rejects_counts_outside_bounds_and_missing_topic() {
    init_test_config();
    let app = question_router(AppState::new());

    let (status, _) = post_json(
        &app,
        "/api/questions/generate",
        json!({"topic": "graphs", "difficulty": "easy", "numberOfQuestions": 5, "type": "mcq"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/questions/generate",
        json!({"topic": "graphs", "difficulty": "easy", "numberOfQuestions": 31, "type": "mcq"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = post_json(
        &app,
        "/api/questions/generate",
        json!({"difficulty": "easy", "numberOfQuestions": 15, "type": "mcq"}),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn generate_returns_the_requested_batch() {
    init_test_config();
    let app = question_router(AppState::new());

    let (status, body) = post_json(
        &app,
        "/api/questions/generate",
        json!({"topic": "sorting", "subtopic": "quicksort", "difficulty": "hard", "numberOfQuestions": 15, "type": "mcq"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let questions = body.as_array().expect("array of questions");
    assert_eq!(questions.len(), 15);

    let ids: HashSet<&str> = questions
        .iter()
        .map(|q| q["id"].as_str().expect("id"))
        .collect();
    assert_eq!(ids.len(), 15);

    for q in questions {
        assert_eq!(q["type"], "mcq");
        assert_eq!(q["topic"], "sorting");
        assert_eq!(q["difficulty_level"], "hard");
        assert_eq!(q["options"].as_array().unwrap().len(), 4);
        // mcq questions carry no test cases.
        assert_eq!(q["test_cases"].as_array().unwrap().len(), 0);
        assert!(q["question_text"]["text"]
            .as_str()
            .unwrap()
            .contains("quicksort in context of sorting"));
    }
}

#[tokio::test]
async fn generated_coding_questions_carry_default_test_cases() {
    init_test_config();
    let app = question_router(AppState::new());

    let (status, body) = post_json(
        &app,
        "/api/questions/generate",
        json!({"topic": "arrays", "difficulty": "medium", "numberOfQuestions": 10, "type": "coding"}),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let questions = body.as_array().unwrap();
    assert_eq!(questions.len(), 10);
    for q in questions {
        let cases = q["test_cases"].as_array().unwrap();
        assert_eq!(cases.len(), 2);
        assert_eq!(cases[0]["input"], "example_input");
        assert_eq!(cases[0]["is_default"], true);
        assert_eq!(cases[1]["input"], json!({"data": [1, 2, 3], "operation": "sum"}));
        assert_eq!(cases[1]["expected_output"], 6);
        assert!(q["question_text"]["starter_code"].is_string());
    }
}

#[tokio::test]
async fn save_rejects_non_array_bodies() {
    init_test_config();
    let app = question_router(AppState::new());

    let (status, body) = post_json(&app, "/api/questions", json!({"not": "an array"})).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input: expected an array of questions");
}

#[tokio::test]
async fn save_appends_and_reports_the_count() {
    init_test_config();
    let state = AppState::new();
    let app = question_router(state.clone());

    // Generate a batch, then post it back to the save endpoint.
    let (_, generated) = post_json(
        &app,
        "/api/questions/generate",
        json!({"topic": "graphs", "difficulty": "easy", "numberOfQuestions": 10, "type": "true-false"}),
    )
    .await;

    let (status, body) = post_json(&app, "/api/questions", generated).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Questions saved successfully");
    assert_eq!(body["count"], 10);

    let req = Request::builder()
        .method("GET")
        .uri("/api/questions")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 16 * 1024 * 1024).await.unwrap();
    let saved: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(saved.as_array().unwrap().len(), 10);
}
