//! Ordered in-memory collections. Persistence is delegated to collaborator
//! services; everything here lives for the lifetime of the process only.

use std::sync::Arc;

use tokio::sync::RwLock;

/// Anything stored by string id.
pub trait Keyed {
    fn key(&self) -> &str;
}

#[derive(Clone)]
pub struct MemoryStore<T> {
    items: Arc<RwLock<Vec<T>>>,
}

impl<T> Default for MemoryStore<T> {
    fn default() -> Self {
        Self {
            items: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

impl<T> MemoryStore<T>
where
    T: Clone + Keyed,
{
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn list(&self) -> Vec<T> {
        self.items.read().await.clone()
    }

    pub async fn get(&self, id: &str) -> Option<T> {
        self.items
            .read()
            .await
            .iter()
            .find(|item| item.key() == id)
            .cloned()
    }

    pub async fn insert(&self, item: T) -> T {
        let mut items = self.items.write().await;
        items.push(item.clone());
        item
    }

    /// Replace the entry with the same id, keeping its position in the list.
    pub async fn replace(&self, id: &str, item: T) -> Option<T> {
        let mut items = self.items.write().await;
        let slot = items.iter_mut().find(|existing| existing.key() == id)?;
        *slot = item.clone();
        Some(item)
    }

    pub async fn remove(&self, id: &str) -> bool {
        let mut items = self.items.write().await;
        let before = items.len();
        items.retain(|item| item.key() != id);
        items.len() != before
    }

    pub async fn append_all(&self, batch: Vec<T>) -> usize {
        let count = batch.len();
        let mut items = self.items.write().await;
        items.extend(batch);
        count
    }

    pub async fn len(&self) -> usize {
        self.items.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.read().await.is_empty()
    }
}
