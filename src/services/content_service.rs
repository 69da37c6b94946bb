use uuid::Uuid;

use crate::dto::content_dto::{CreateContentPayload, UpdateContentPayload};
use crate::error::{Error, Result};
use crate::models::content::Content;
use crate::store::memory::{Keyed, MemoryStore};
use crate::utils::time;

impl Keyed for Content {
    fn key(&self) -> &str {
        &self.id
    }
}

#[derive(Clone, Default)]
pub struct ContentService {
    store: MemoryStore<Content>,
}

impl ContentService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<Content> {
        self.store.list().await
    }

    pub async fn get_by_id(&self, id: &str) -> Result<Content> {
        self.store
            .get(id)
            .await
            .ok_or_else(|| Error::NotFound("Content not found".to_string()))
    }

    pub async fn create(&self, payload: CreateContentPayload) -> Result<Content> {
        let now = time::now();
        let content = Content {
            id: Uuid::new_v4().to_string(),
            title: payload.title,
            body: payload.body,
            topic: payload.topic,
            created_at: now,
            updated_at: now,
        };
        Ok(self.store.insert(content).await)
    }

    pub async fn update(&self, id: &str, payload: UpdateContentPayload) -> Result<Content> {
        let mut content = self.get_by_id(id).await?;
        if let Some(title) = payload.title {
            content.title = title;
        }
        if let Some(body) = payload.body {
            content.body = body;
        }
        content.topic = payload.topic.or(content.topic);
        content.updated_at = time::now();
        self.store
            .replace(id, content)
            .await
            .ok_or_else(|| Error::NotFound("Content not found".to_string()))
    }

    pub async fn delete(&self, id: &str) -> Result<()> {
        if self.store.remove(id).await {
            Ok(())
        } else {
            Err(Error::NotFound("Content not found".to_string()))
        }
    }
}
