use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::models::template::{QuestionTemplate, TemplateType, TemplateValidationRules};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValidationOutcome {
    pub is_valid: bool,
    pub errors: Vec<String>,
}

fn default_rules() -> TemplateValidationRules {
    TemplateValidationRules {
        min_length: Some(10),
        max_length: Some(1000),
        required_fields: Some(vec![
            "name".to_string(),
            "template".to_string(),
            "type".to_string(),
        ]),
        required_variables: Some(vec!["TOPIC".to_string()]),
        pattern: None,
    }
}

/// Validate a template against its own rules, or the defaults when it carries
/// none. A template-supplied rule set replaces the defaults entirely, so an
/// explicit empty `requiredVariables` list skips the placeholder check.
pub fn validate_template(template: &QuestionTemplate) -> ValidationOutcome {
    let mut errors = Vec::new();
    let rules = template
        .validation_rules
        .clone()
        .unwrap_or_else(default_rules);

    if let Some(fields) = &rules.required_fields {
        for field in fields {
            if !template.field_is_populated(field) {
                errors.push(format!("{} is required", field));
            }
        }
    }

    let body_len = template.template.chars().count();
    if let Some(min) = rules.min_length {
        if min > 0 && body_len < min {
            errors.push(format!("Template must be at least {} characters long", min));
        }
    }
    if let Some(max) = rules.max_length {
        if max > 0 && body_len > max {
            errors.push(format!("Template must not exceed {} characters", max));
        }
    }

    if let Some(variables) = &rules.required_variables {
        for variable in variables {
            if !template.template.contains(&format!("[{}]", variable)) {
                errors.push(format!("Template must include [{}] variable", variable));
            }
        }
    }

    if let Some(pattern) = &rules.pattern {
        if !template.template.is_empty() {
            // A malformed user-supplied pattern is itself a validation error.
            match Regex::new(pattern) {
                Ok(regex) => {
                    if !regex.is_match(&template.template) {
                        errors.push("Template format is invalid".to_string());
                    }
                }
                Err(_) => errors.push("Template validation pattern is invalid".to_string()),
            }
        }
    }

    if template.template_type == TemplateType::Mcq && !template.template.contains("[OPTIONS]") {
        errors.push("Multiple choice templates must include [OPTIONS] placeholder".to_string());
    }

    ValidationOutcome {
        is_valid: errors.is_empty(),
        errors,
    }
}
