use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateType {
    Mcq,
    OpenEnded,
}

/// Per-template override of the default validation rule set. When present it
/// replaces the defaults entirely, not field-by-field.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TemplateValidationRules {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<usize>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_fields: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub required_variables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuestionTemplate {
    pub id: String,
    pub name: String,
    #[serde(rename = "type")]
    pub template_type: TemplateType,
    pub template: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub variables: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub examples: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_public: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub format_instructions: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation_rules: Option<TemplateValidationRules>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl QuestionTemplate {
    /// Whether a field named in a `requiredFields` rule carries a value.
    /// Mirrors the original's truthiness test: empty strings and `false` are
    /// absent, lists count as present once set. Unknown names are absent.
    pub fn field_is_populated(&self, field: &str) -> bool {
        match field {
            "id" => !self.id.is_empty(),
            "name" => !self.name.is_empty(),
            "type" => true,
            "template" => !self.template.is_empty(),
            "subject" => opt_nonempty(&self.subject),
            "difficulty" => opt_nonempty(&self.difficulty),
            "category" => opt_nonempty(&self.category),
            "description" => opt_nonempty(&self.description),
            "language" => opt_nonempty(&self.language),
            "formatInstructions" => opt_nonempty(&self.format_instructions),
            "tags" => self.tags.is_some(),
            "variables" => self.variables.is_some(),
            "examples" => self.examples.is_some(),
            "isPublic" => self.is_public == Some(true),
            "validationRules" => self.validation_rules.is_some(),
            _ => false,
        }
    }
}

fn opt_nonempty(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|s| !s.is_empty())
}
