// src/services/shortener.rs - Business logic
use log::{error, info};
use serde_json::Value;
use validator::Validate;

use crate::errors::{AppError, RepositoryError};
use crate::models::{ShortenRequest, ShortenResponse};
use crate::repositories::SharedUrlRepository;
use crate::utils::code_generator;

type Result<T> = std::result::Result<T, AppError>;

/// Bounded retry on generator collisions. The 2^48 code space makes more
/// than one attempt vanishingly rare.
const MAX_CODE_ATTEMPTS: usize = 5;

pub struct ShortenerService {
    repository: SharedUrlRepository,
    base_url: String,
}

impl ShortenerService {
    pub fn new(repository: SharedUrlRepository, base_url: String) -> Self {
        Self {
            repository,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Validates the submitted URL, generates a code, and stores the pair.
    pub async fn shorten(&self, request: ShortenRequest) -> Result<ShortenResponse> {
        if request.validate().is_err() {
            return Err(AppError::Validation("Invalid URL format".to_string()));
        }

        let code = self.reserve_code(&request.url).await?;
        info!("Shortened '{}' to code '{}'", request.url, code);

        Ok(ShortenResponse {
            short_url: format!("{}/{}", self.base_url, code),
            original_url: request.url,
        })
    }

    /// Resolves a short code to its stored original URL.
    ///
    /// Lookup failures surface as not-found: a broken backend and an
    /// unknown code are indistinguishable to the redirecting client.
    pub async fn resolve(&self, code: &str) -> Result<String> {
        match self.repository.find_by_code(code).await {
            Ok(Some(original_url)) => Ok(original_url),
            Ok(None) => Err(AppError::NotFound("URL not found".to_string())),
            Err(e) => {
                error!("Failed to look up code '{}': {}", code, e);
                Err(AppError::NotFound("URL not found".to_string()))
            }
        }
    }

    /// Returns every stored association.
    pub async fn dump(&self) -> Result<Value> {
        self.repository.dump().await.map_err(|e| {
            error!("Failed to fetch stored URLs: {}", e);
            AppError::Internal("Failed to fetch URLs".to_string())
        })
    }

    async fn reserve_code(&self, original_url: &str) -> Result<String> {
        for _ in 0..MAX_CODE_ATTEMPTS {
            let code = code_generator::generate_short_code();

            match self.repository.find_by_code(&code).await {
                Ok(Some(_)) => continue, // collision, draw again
                Ok(None) => {}
                Err(e) => {
                    error!("Failed to check code '{}': {}", code, e);
                    return Err(storage_failure());
                }
            }

            match self.repository.save(&code, original_url).await {
                Ok(()) => return Ok(code),
                // Lost the code to a concurrent shorten between check and save
                Err(RepositoryError::Conflict(_)) => continue,
                Err(e) => {
                    error!("Failed to create URL mapping: {}", e);
                    return Err(storage_failure());
                }
            }
        }

        error!(
            "Exhausted {} attempts to generate a unique short code",
            MAX_CODE_ATTEMPTS
        );
        Err(storage_failure())
    }
}

fn storage_failure() -> AppError {
    AppError::Internal("Failed to create short URL".to_string())
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::Value;

    use super::*;
    use crate::repositories::MemoryRepository;

    fn memory_service() -> (ShortenerService, SharedUrlRepository) {
        let repository: SharedUrlRepository = Arc::new(MemoryRepository::new());
        let service = ShortenerService::new(repository.clone(), "http://localhost:8080".to_string());
        (service, repository)
    }

    fn code_of(response: &ShortenResponse) -> &str {
        response.short_url.rsplit('/').next().unwrap()
    }

    #[tokio::test]
    async fn test_shorten_round_trip() {
        let (service, _) = memory_service();

        let response = service
            .shorten(ShortenRequest {
                url: "https://example.com/page".to_string(),
            })
            .await
            .unwrap();

        assert_eq!(response.original_url, "https://example.com/page");
        assert!(response.short_url.starts_with("http://localhost:8080/"));

        let code = code_of(&response);
        assert_eq!(code.len(), code_generator::CODE_LENGTH);
        assert_eq!(
            service.resolve(code).await.unwrap(),
            "https://example.com/page"
        );
    }

    #[tokio::test]
    async fn test_shorten_rejects_invalid_url_and_stores_nothing() {
        let (service, repository) = memory_service();

        let err = service
            .shorten(ShortenRequest {
                url: "not-a-url".to_string(),
            })
            .await
            .unwrap_err();

        assert!(matches!(err, AppError::Validation(msg) if msg == "Invalid URL format"));
        assert_eq!(repository.dump().await.unwrap(), serde_json::json!({}));
    }

    #[tokio::test]
    async fn test_resolve_unknown_code_is_not_found() {
        let (service, _) = memory_service();
        let err = service.resolve("missing1").await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn test_base_url_trailing_slash_is_trimmed() {
        let repository: SharedUrlRepository = Arc::new(MemoryRepository::new());
        let service = ShortenerService::new(repository, "http://localhost:8080/".to_string());

        let response = service
            .shorten(ShortenRequest {
                url: "https://example.com".to_string(),
            })
            .await
            .unwrap();

        let code = code_of(&response);
        assert_eq!(
            response.short_url,
            format!("http://localhost:8080/{}", code)
        );
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_shortens_do_not_lose_writes() {
        let repository: SharedUrlRepository = Arc::new(MemoryRepository::new());
        let service = Arc::new(ShortenerService::new(
            repository.clone(),
            "http://localhost:8080".to_string(),
        ));

        let mut handles = Vec::new();
        for i in 0..100 {
            let service = service.clone();
            handles.push(tokio::spawn(async move {
                service
                    .shorten(ShortenRequest {
                        url: format!("https://example.com/page/{}", i),
                    })
                    .await
                    .unwrap()
            }));
        }

        let mut responses = Vec::new();
        for handle in handles {
            responses.push(handle.await.unwrap());
        }

        let dump = repository.dump().await.unwrap();
        let map = dump.as_object().unwrap();
        assert_eq!(map.len(), 100);

        for response in &responses {
            let stored = map.get(code_of(response)).unwrap();
            assert_eq!(stored, &Value::String(response.original_url.clone()));
        }
    }
}
