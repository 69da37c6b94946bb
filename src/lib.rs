pub mod config;
pub mod dto;
pub mod error;
pub mod middleware;
pub mod models;
pub mod routes;
pub mod services;
pub mod store;
pub mod utils;

use crate::services::{
    assessment_service::AssessmentService, auth_service::AuthService,
    content_service::ContentService, draft_service::DraftService,
    generation_service::GenerationService, question_service::QuestionService,
    template_service::TemplateService,
};

#[derive(Clone)]
pub struct AppState {
    pub auth_service: AuthService,
    pub generation_service: GenerationService,
    pub question_service: QuestionService,
    pub template_service: TemplateService,
    pub content_service: ContentService,
    pub assessment_service: AssessmentService,
    pub draft_service: DraftService,
}

impl AppState {
    pub fn new() -> Self {
        Self {
            auth_service: AuthService::new(),
            generation_service: GenerationService::new(),
            question_service: QuestionService::new(),
            template_service: TemplateService::new(),
            content_service: ContentService::new(),
            assessment_service: AssessmentService::new(),
            draft_service: DraftService::new(),
        }
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new()
    }
}
