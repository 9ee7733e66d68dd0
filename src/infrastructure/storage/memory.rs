//! In-memory store implementation

use async_trait::async_trait;
use tokio::sync::RwLock;

use super::Store;
use crate::domain::StoreDocument;

/// In-memory store for development and testing
#[derive(Default)]
pub struct MemoryStore {
    document: RwLock<StoreDocument>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl Store for MemoryStore {
    async fn load(&self) -> StoreDocument {
        self.document.read().await.clone()
    }

    async fn save(&self, doc: &StoreDocument) {
        *self.document.write().await = doc.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::User;

    #[tokio::test]
    async fn save_then_load_round_trips() {
        let store = MemoryStore::new();
        assert!(store.load().await.users.is_empty());

        let mut doc = store.load().await;
        doc.users.push(User {
            id: store.new_id(),
            username: "alice".to_string(),
            password_hash: "h".to_string(),
        });
        store.save(&doc).await;

        let reloaded = store.load().await;
        assert_eq!(reloaded.users.len(), 1);
        assert_eq!(reloaded.users[0].username, "alice");
    }
}
