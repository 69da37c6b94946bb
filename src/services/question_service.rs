use std::sync::Arc;

use tokio::sync::RwLock;
use tracing::info;

use crate::models::question::Question;

/// Mock persistence for saved questions: an append-only in-memory list, the
/// way the stand-in save endpoint behaves. Nothing survives a restart.
#[derive(Clone, Default)]
pub struct QuestionService {
    saved: Arc<RwLock<Vec<Question>>>,
}

impl QuestionService {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn save_all(&self, batch: Vec<Question>) -> usize {
        let count = batch.len();
        let mut saved = self.saved.write().await;
        saved.extend(batch);
        info!(count, total = saved.len(), "Saved question batch");
        count
    }

    pub async fn list_saved(&self) -> Vec<Question> {
        self.saved.read().await.clone()
    }
}
