use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::question::Question;

#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct CreateAssessmentPayload {
    #[validate(length(min = 1))]
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: i32,
    #[serde(default)]
    pub questions: Vec<Question>,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateAssessmentPayload {
    #[validate(length(min = 1))]
    pub title: Option<String>,
    pub description: Option<String>,
    #[validate(range(min = 1, message = "Duration must be at least 1 minute"))]
    pub duration: Option<i32>,
    pub questions: Option<Vec<Question>>,
}
