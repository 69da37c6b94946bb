use uuid::Uuid;

use crate::dto::assessment_dto::{CreateAssessmentPayload, UpdateAssessmentPayload};
use crate::error::{Error, Result};
use crate::models::assessment::Assessment;
use crate::store::memory::{Keyed, MemoryStore};
use crate::utils::time;

impl Keyed for Assessment {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Default)]
pub struct AssessmentService {
    store: MemoryStore<Assessment>,
}

impl AssessmentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Assessment> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Assessment> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))
    }

    pub async fn create(&self, payload: CreateAssessmentPayload) -> Result<Assessment> {
        let now = time::now();
        let assessment = Assessment {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            description: payload.description,
            duration: payload.duration,
            questions: payload.questions,
            created_at: now,
            updated_at: now,
        };
        Ok(self.store.insert(assessment).await)
    }

    pub async fn update(&self, id: &str, payload: UpdateAssessmentPayload) -> Result<Assessment> {
        let mut assessment = self.get_by_id(id).await?;
        if let Some(title) = payload.title {
            assessment.title = title;
        }
        if let Some(description) = payload.description {
            assessment.description = description;
        }
        if let Some(duration) = payload.duration {
            assessment.duration = duration;
        }
        if let Some(questions) = payload.questions {
            assessment.questions = questions;
        }
        assessment.updated_at = time::now();
        self.store
            .replace(id, assessment)
            .await
            .ok_or_else(|| Error::NotFound("Assessment not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.remove(id).await {
            Ok(())
        } else {
            Err(Error::NotFound("Assessment not found".to_string()))
        }
    }
}
