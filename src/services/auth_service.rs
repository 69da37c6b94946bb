use std::collections::HashSet;
use std::sync::Arc;

use chrono::Duration;
use jsonwebtoken::{encode, EncodingKey, Header};
use subtle::ConstantTimeEq;
use tokio::sync::RwLock;
use tracing::info;

use crate::config::get_config;
use crate::dto::auth_dto::LoginResponse;
use crate::error::{Error, Result};
use crate::middleware::auth::{decode_token, Claims};
use crate::models::user::User;
use crate::utils::time;

struct MockUser {
    id: &'static str,
    username: &'static str,
    password: &'static str,
    name: &'static str,
    email: &'static str,
    role: &'static str,
}

/// Fixed development directory; a real identity provider replaces this in
/// production deployments.
const MOCK_USERS: &[MockUser] = &[
    MockUser {
        id: "1",
        username: "admin",
        password: "admin123",
        name: "Administrator",
        email: "admin@example.com",
        role: "admin",
    },
    MockUser {
        id: "2",
        username: "user",
        password: "user123",
        name: "Regular User",
        email: "user@example.com",
        role: "user",
    },
];

/// The single session capability object: login, logout, current user,
/// authenticated check. Constructed once and handed to whoever needs it.
#[derive(Clone, Default)]
pub struct AuthService {
    revoked: Arc<RwLock<HashSet<String>>>,
}

impl AuthService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn login(&self, username: &str, password: &str) -> Result<LoginResponse> {
        let user = MOCK_USERS
            .iter()
            .find(|u| u.username == username)
            .filter(|u| constant_time_eq(u.password, password))
            .ok_or_else(|| Error::Unauthorized("Invalid credentials".to_string()))?;

        let config = get_config();
        let expires_at = time::now() + Duration::minutes(config.token_ttl_minutes);
        let claims = Claims {
            sub: user.id.to_string(),
            preferred_username: user.username.to_string(),
            name: Some(user.name.to_string()),
            email: Some(user.email.to_string()),
            role: Some(user.role.to_string()),
            exp: expires_at.timestamp() as usize,
        };
        let token = encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(config.jwt_secret.as_bytes()),
        )
        .map_err(|e| Error::Internal(format!("Failed to sign token: {}", e)))?;

        info!(username, "User logged in");
        Ok(LoginResponse {
            token,
            user: user_from_claims(&claims),
        })
    }

    /// Stateless tokens get revocation through an in-memory denylist.
    pub async fn logout(&self, token: &str) {
        self.revoked.write().await.insert(token.to_string());
    }

    pub async fn is_revoked(&self, token: &str) -> bool {
        self.revoked.read().await.contains(token)
    }

    pub async fn current_user(&self, token: &str) -> Result<User> {
        if self.is_revoked(token).await {
            return Err(Error::Unauthorized("Token has been revoked".to_string()));
        }
        let claims = decode_token(token)?;
        Ok(user_from_claims(&claims))
    }

    pub async fn is_authenticated(&self, token: &str) -> bool {
        self.current_user(token).await.is_ok()
    }
}

fn user_from_claims(claims: &Claims) -> User {
    User {
        id: claims.sub.clone(),
        username: claims.preferred_username.clone(),
        name: claims.name.clone().unwrap_or_default(),
        email: claims.email.clone(),
        role: claims.role.clone(),
    }
}

fn constant_time_eq(expected: &str, candidate: &str) -> bool {
    expected.len() == candidate.len()
        && expected
            .as_bytes()
            .ct_eq(candidate.as_bytes())
            .into()
}
