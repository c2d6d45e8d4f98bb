use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use super::UrlRepository;
use crate::errors::RepositoryError;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Map-backed storage. The lock keeps concurrent shortens from racing on
/// shared state; writes hold it only for the insert itself.
#[derive(Default)]
pub struct MemoryRepository {
    urls: RwLock<HashMap<String, String>>,
}

impl MemoryRepository {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UrlRepository for MemoryRepository {
    async fn save(&self, code: &str, original_url: &str) -> Result<()> {
        let mut urls = self
            .urls
            .write()
            .map_err(|_| RepositoryError::Storage("URL map lock poisoned".to_string()))?;

        // A repeated code overwrites the previous entry; the service layer
        // checks for collisions before calling save
        urls.insert(code.to_string(), original_url.to_string());
        Ok(())
    }

    async fn find_by_code(&self, code: &str) -> Result<Option<String>> {
        let urls = self
            .urls
            .read()
            .map_err(|_| RepositoryError::Storage("URL map lock poisoned".to_string()))?;

        Ok(urls.get(code).cloned())
    }

    async fn dump(&self) -> Result<Value> {
        let urls = self
            .urls
            .read()
            .map_err(|_| RepositoryError::Storage("URL map lock poisoned".to_string()))?;

        serde_json::to_value(&*urls).map_err(|e| RepositoryError::Storage(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_save_and_find() {
        let repo = MemoryRepository::new();
        repo.save("AbC12XyZ", "https://example.com/page")
            .await
            .unwrap();

        let found = repo.find_by_code("AbC12XyZ").await.unwrap();
        assert_eq!(found.as_deref(), Some("https://example.com/page"));
    }

    #[tokio::test]
    async fn test_find_unknown_code_is_none() {
        let repo = MemoryRepository::new();
        assert_eq!(repo.find_by_code("missing1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_dump_is_empty_object_when_unused() {
        let repo = MemoryRepository::new();
        let dump = repo.dump().await.unwrap();
        assert_eq!(dump, serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_dump_contains_every_association() {
        let repo = MemoryRepository::new();
        repo.save("code0001", "https://example.com/a").await.unwrap();
        repo.save("code0002", "https://example.com/b").await.unwrap();

        let dump = repo.dump().await.unwrap();
        let map = dump.as_object().unwrap();
        assert_eq!(map.len(), 2);
        assert_eq!(map["code0001"], "https://example.com/a");
        assert_eq!(map["code0002"], "https://example.com/b");
    }
}
