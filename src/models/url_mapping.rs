// src/models/url_mapping.rs - Pure data structures
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use validator::Validate;

use crate::validations::validate_url;

// DTO for the shorten request body
#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct ShortenRequest {
    #[validate(custom(function = "validate_url"))]
    pub url: String,
}

// DTO for a successful shorten response
#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    /// Absolute short URL, built from the configured public base address
    pub short_url: String,

    /// The URL the client submitted, echoed back untouched
    pub original_url: String,
}

/// A stored short-code association (persisted variant only; the in-memory
/// backend keeps plain code → URL pairs with no row metadata)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct UrlMapping {
    /// Row identifier
    pub id: i64,

    /// When this mapping was created
    pub created_at: DateTime<Utc>,

    /// When this mapping was last written
    pub updated_at: DateTime<Utc>,

    /// Soft-delete marker. Reserved: no endpoint sets it, reads skip
    /// anything marked.
    pub deleted_at: Option<DateTime<Utc>>,

    /// The generated code identifying this mapping
    pub short_code: String,

    /// The original, long URL that was shortened. Stored opaque, never
    /// normalized.
    pub original_url: String,
}
