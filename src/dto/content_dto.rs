use serde::{Deserialize, Serialize};
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateContentPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub body: String,
    #[serde(default)]
    pub topic: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateContentPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub body: Option<String>,
    pub topic: Option<String>,
}
