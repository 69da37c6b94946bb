use std::env;

use authoring_backend::{middleware, routes, AppState};
use axum::{
    body::{to_bytes, Body},
    http::{header, Request, StatusCode},
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

fn template_router(state: AppState) -> Router {
    let authoring = Router::new()
        .route(
            "/api/templates",
            get(routes::templates::list_templates).post(routes::templates::create_template),
        )
        .route(
            "/api/templates/examples",
            get(routes::templates::example_templates),
        )
        .route(
            "/api/templates/export",
            get(routes::templates::export_templates),
        )
        .route(
            "/api/templates/import",
            post(routes::templates::import_templates),
        )
        .route(
            "/api/templates/:id",
            get(routes::templates::get_template)
                .put(routes::templates::update_template)
                .delete(routes::templates::delete_template),
        )
        .layer(axum::middleware::from_fn_with_state(
            state.clone(),
            middleware::auth::require_bearer_auth,
        ));

    Router::new()
        .route("/api/auth/login", post(routes::auth::login))
        .merge(authoring)
        .with_state(state)
}

async fn login_token(app: &Router) -> String {
    let req = Request::builder()
        .method("POST")
        .uri("/api/auth/login")
        .header("content-type", "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": "admin123"}).to_string(),
        ))
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap();
    body["token"].as_str().expect("token").to_string()
}

async fn send(
    app: &Router,
    method: &str,
    uri: &str,
    token: &str,
    body: Option<JsonValue>,
) -> (StatusCode, JsonValue) {
    let builder = Request::builder()
        .method(method)
        .uri(uri)
        .header("authorization", format!("Bearer {}", token));
    let req = match body {
        Some(value) => builder
            .header("content-type", "application/json")
            .body(Body::from(value.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };
    let resp = app.clone().oneshot(req).await.unwrap();
    let status = resp.status();
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let body: JsonValue = serde_json::from_slice(&bytes).unwrap_or(JsonValue::Null);
    (status, body)
}

fn valid_template(name: &str) -> JsonValue {
    json!({
        "name": name,
        "type": "open_ended",
        "template": "Explain [TOPIC] in your own words.",
        "subject": "General"
    })
}

#[tokio::test]
async fn template_crud_flow() {
    init_test_config();
    let app = template_router(AppState::new());
    let token = login_token(&app).await;

    let (status, created) = send(
        &app,
        "POST",
        "/api/templates",
        &token,
        Some(valid_template("Concept check")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let id = created["id"].as_str().expect("id").to_string();
    assert_eq!(created["name"], "Concept check");
    assert!(created["createdAt"].is_string());

    let (status, listed) = send(&app, "GET", "/api/templates", &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(listed.as_array().unwrap().len(), 1);

    let uri = format!("/api/templates/{}", id);
    let (status, fetched) = send(&app, "GET", &uri, &token, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["id"], id.as_str());

    let (status, updated) = send(
        &app,
        "PUT",
        &uri,
        &token,
        Some(json!({"name": "Renamed", "difficulty": "hard"})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["name"], "Renamed");
    assert_eq!(updated["difficulty"], "hard");

    let (status, _) = send(&app, "DELETE", &uri, &token, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, "GET", &uri, &token, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn create_applies_default_rules_unless_overridden() {
    init_test_config();
    let app = template_router(AppState::new());
    let token = login_token(&app).await;

    // Default rules require the [TOPIC] placeholder.
    let mut missing = valid_template("No placeholder");
    missing["template"] = json!("A body without the placeholder.");
    let (status, body) = send(&app, "POST", "/api/templates", &token, Some(missing.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e.as_str().unwrap().contains("TOPIC")));

    // The same body with an explicit empty requiredVariables list passes.
    missing["validationRules"] = json!({"requiredVariables": []});
    let (status, _) = send(&app, "POST", "/api/templates", &token, Some(missing)).await;
    assert_eq!(status, StatusCode::CREATED);

    // mcq templates additionally need [OPTIONS].
    let mut mcq = valid_template("MCQ");
    mcq["type"] = json!("mcq");
    let (status, body) = send(&app, "POST", "/api/templates", &token, Some(mcq.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["errors"]
        .as_array()
        .unwrap()
        .iter()
        .any(|e| e.as_str().unwrap().contains("[OPTIONS]")));

    mcq["template"] = json!("What is [TOPIC]?\n[OPTIONS]");
    let (status, _) = send(&app, "POST", "/api/templates", &token, Some(mcq)).await;
    assert_eq!(status, StatusCode::CREATED);
}

#[tokio::test]
async fn unauthenticated_requests_are_rejected() {
    init_test_config();
    let app = template_router(AppState::new());

    let req = Request::builder()
        .method("GET")
        .uri("/api/templates")
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn examples_are_available_without_creating_anything() {
    init_test_config();
    let app = template_router(AppState::new());
    let token = login_token(&app).await;

    let (status, body) = send(&app, "GET", "/api/templates/examples", &token, None).await;
    assert_eq!(status, StatusCode::OK);
    let examples = body.as_array().unwrap();
    assert_eq!(examples.len(), 3);
    assert!(examples.iter().any(|t| t["type"] == "mcq"));
}

#[tokio::test]
async fn export_and_import_round_trip() {
    init_test_config();
    let app = template_router(AppState::new());
    let token = login_token(&app).await;

    send(
        &app,
        "POST",
        "/api/templates",
        &token,
        Some(valid_template("Exported one")),
    )
    .await;

    let req = Request::builder()
        .method("GET")
        .uri("/api/templates/export")
        .header("authorization", format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap();
    let resp = app.clone().oneshot(req).await.unwrap();
    assert_eq!(resp.status(), StatusCode::OK);
    let disposition = resp
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(disposition.contains("attachment"));
    assert!(disposition.contains("templates_"));
    let bytes = to_bytes(resp.into_body(), 1024 * 1024).await.unwrap();
    let exported: JsonValue = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(exported.as_array().unwrap().len(), 1);

    // Import rejects anything that is not an array.
    let (status, body) = send(
        &app,
        "POST",
        "/api/templates/import",
        &token,
        Some(json!({"name": "not an array"})),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid template format");

    // Re-importing the export creates fresh entries sequentially.
    let (status, body) = send(&app, "POST", "/api/templates/import", &token, Some(exported)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 1);

    let (_, listed) = send(&app, "GET", "/api/templates", &token, None).await;
    assert_eq!(listed.as_array().unwrap().len(), 2);
}
