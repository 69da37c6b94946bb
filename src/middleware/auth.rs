use axum::{
    extract::{Request, State},
    http::StatusCode,
    middleware::Next,
    response::{IntoResponse, Json, Response},
};
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::error::{Error, Result};
use crate::AppState;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub sub: String,
    pub preferred_username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    pub exp: usize,
}

pub fn decode_token(token: &str) -> Result<Claims> {
    let config = crate::config::get_config();
    let mut validation = Validation::new(Algorithm::HS256);
    validation.validate_exp = true;
    decode::<Claims>(
        token,
        &DecodingKey::from_secret(config.jwt_secret.as_bytes()),
        &validation,
    )
    .map(|data| data.claims)
    .map_err(|_| Error::Unauthorized("invalid_token".to_string()))
}

fn bearer_token(req: &Request) -> std::result::Result<&str, &'static str> {
    let Some(auth_header) = req.headers().get(axum::http::header::AUTHORIZATION) else {
        return Err("missing_authorization");
    };
    let Ok(auth_str) = auth_header.to_str() else {
        return Err("bad_authorization");
    };
    auth_str.strip_prefix("Bearer ").ok_or("unsupported_scheme")
}

/// Reject requests without a valid, unrevoked bearer token; on success the
/// decoded claims are attached as a request extension.
pub async fn require_bearer_auth(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Response {
    let token = match bearer_token(&req) {
        Ok(token) => token.to_string(),
        Err(reason) => {
            return (StatusCode::UNAUTHORIZED, Json(json!({ "error": reason }))).into_response()
        }
    };

    if state.auth_service.is_revoked(&token).await {
        return (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "revoked_token" })),
        )
            .into_response();
    }

    match decode_token(&token) {
        Ok(claims) => {
            req.extensions_mut().insert(claims);
            next.run(req).await
        }
        Err(_) => (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "error": "invalid_token" })),
        )
            .into_response(),
    }
}
