use axum::{
    extract::State,
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Json},
};
use serde_json::json;
use validator::Validate;

use crate::{
    dto::auth_dto::{LoginPayload, SessionResponse},
    error::{Error, Result},
    AppState,
};

fn bearer_token(headers: &HeaderMap) -> Result<&str> {
    headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix("Bearer "))
        .ok_or_else(|| Error::Unauthorized("missing_authorization".to_string()))
}

#[axum::debug_handler]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let response = state
        .auth_service
        .login(&payload.username, &payload.password)
        .await?;
    Ok(Json(response))
}

#[axum::debug_handler]
pub async fn logout(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let token = bearer_token(&headers)?;
    state.auth_service.logout(token).await;
    Ok((StatusCode::OK, Json(json!({ "message": "Logged out" }))))
}

#[axum::debug_handler]
pub async fn validate(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<impl IntoResponse> {
    let token = bearer_token(&headers)?;
    let user = state.auth_service.current_user(token).await?;
    Ok(Json(SessionResponse { valid: true, user }))
}
