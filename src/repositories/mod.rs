// src/repositories/mod.rs - Storage backends
use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

mod memory;
mod postgres;

pub use memory::MemoryRepository;
pub use postgres::PostgresRepository;

use crate::errors::RepositoryError;

type Result<T> = std::result::Result<T, RepositoryError>;

/// Storage contract shared by both backends. Associations are write-once:
/// there is no update or delete operation.
#[async_trait]
pub trait UrlRepository: Send + Sync {
    /// Persists a short code → original URL association
    ///
    /// ### Errors
    /// * `RepositoryError::Conflict` - If the code is already taken (persisted variant)
    /// * `RepositoryError::Database` - If the underlying store fails
    async fn save(&self, code: &str, original_url: &str) -> Result<()>;

    /// Looks up the original URL for a short code, `None` if unknown
    async fn find_by_code(&self, code: &str) -> Result<Option<String>>;

    /// Returns every stored association in the backend's natural JSON
    /// shape: a plain code → URL object for the in-memory variant, an
    /// array of full records for the persisted one
    async fn dump(&self) -> Result<Value>;
}

/// Handlers and services hold the backend behind this alias; the concrete
/// variant is chosen once at startup.
pub type SharedUrlRepository = Arc<dyn UrlRepository>;
