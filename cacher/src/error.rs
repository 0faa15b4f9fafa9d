//! Unified error types for the rising cache
//!
//! This module defines error types for each layer:
//! - `DomainError`: Broken invariants in the core (always fatal)
//! - `FeedError`: Feed source failures (cycle-local)
//! - `StoreError`: Snapshot store failures (cycle-local)
//! - `RenderError`: Template rendering failures
//! - `AppError`: Application layer errors (wraps all of the above for the poll loop)

use thiserror::Error;

/// Domain layer errors - invariants that only a broken deployment can violate
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),
}

/// Feed source errors
#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("Rate limited")]
    RateLimited,

    #[error("Deserialization error: {0}")]
    Deserialization(String),
}

/// Snapshot store errors
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Compression error: {0}")]
    Compression(String),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Renderer errors
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("Failed to read template {path}: {source}")]
    Template {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Template is missing the cache placeholder")]
    MissingPlaceholder,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Application layer errors - what a poll cycle can fail with
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Domain(#[from] DomainError),

    #[error("Fetch failed: {0}")]
    Fetch(#[from] FeedError),

    #[error("Store failed: {0}")]
    Store(#[from] StoreError),

    #[error("Render failed: {0}")]
    Render(#[from] RenderError),
}

impl AppError {
    /// Fatal errors abort the poll loop; everything else only costs one cycle.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Domain(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invariant_violations_are_fatal() {
        let err: AppError = DomainError::InvariantViolation("ids/votes".to_string()).into();
        assert!(err.is_fatal());
        assert!(err.to_string().contains("ids/votes"));
    }

    #[test]
    fn io_failures_are_cycle_local() {
        let fetch: AppError = FeedError::RateLimited.into();
        let store: AppError = StoreError::Api {
            status: 503,
            message: "backend unavailable".to_string(),
        }
        .into();
        let render: AppError = RenderError::MissingPlaceholder.into();

        assert!(!fetch.is_fatal());
        assert!(!store.is_fatal());
        assert!(!render.is_fatal());
        assert!(store.to_string().contains("503"));
    }
}
