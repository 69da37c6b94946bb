use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::template::{TemplateType, TemplateValidationRules};

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct CreateTemplatePayload {
    #[validate(length(min = 1))]
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    pub template: String,
    #[serde(default)]
    pub subject: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub variables: Option<Vec<String>>,
    #[serde(default)]
    pub examples: Option<Vec<String>>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub is_public: Option<bool>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub format_instructions: Option<String>,
    #[serde(default)]
    pub validation_rules: Option<TemplateValidationRules>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateTemplatePayload {
    #[validate(length(min = 1))]
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub template_type: Option<TemplateType>,
    pub template: Option<String>,
    pub subject: Option<String>,
    pub difficulty: Option<String>,
    pub category: Option<String>,
    pub tags: Option<Vec<String>>,
    pub variables: Option<Vec<String>>,
    pub examples: Option<Vec<String>>,
    pub description: Option<String>,
    pub is_public: Option<bool>,
    pub language: Option<String>,
    pub format_instructions: Option<String>,
    pub validation_rules: Option<TemplateValidationRules>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportTemplatesResponse {
    pub message: String,
    pub count: usize,
}
