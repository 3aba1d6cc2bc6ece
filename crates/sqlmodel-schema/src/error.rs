//! Error types for the sqlmodel-schema crate.
//!
//! Normalization and DDL generation are infallible; only reading model
//! metadata from text can fail.

use thiserror::Error;

/// Alias for `Result<T, SchemaError>`.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Errors raised while loading model metadata.
#[derive(Debug, Error)]
pub enum SchemaError {
    /// JSON model metadata could not be parsed.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// TOML model metadata could not be parsed.
    #[error("toml error: {0}")]
    Toml(#[from] toml::de::Error),
}
