pub mod assessment_service;
pub mod auth_service;
pub mod content_service;
pub mod draft_service;
pub mod generation_service;
pub mod question_service;
pub mod template_service;
