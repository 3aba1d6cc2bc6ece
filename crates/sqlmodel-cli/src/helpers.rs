//! Shared helper functions used across CLI subcommands.
//!
//! Includes tracing initialization, model and config loading, and parameter
//! parsing.

use std::path::Path;

use anyhow::{Context, Result};
use sqlmodel_schema::ModelDefinition;
use sqlmodel_store::{SqlValue, StoreConfig};
use tracing_subscriber::EnvFilter;

// ---------------------------------------------------------------------------
// Tracing
// ---------------------------------------------------------------------------

/// Initialize the tracing subscriber with the given default log level.
pub fn init_tracing(default_level: &str) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

// ---------------------------------------------------------------------------
// Inputs
// ---------------------------------------------------------------------------

/// Load a model from a `.json` or `.toml` file, chosen by extension.
pub fn load_model(path: &Path) -> Result<ModelDefinition> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read model {}", path.display()))?;

    let model = match path.extension().and_then(|e| e.to_str()) {
        Some("toml") => ModelDefinition::from_toml_str(&content),
        _ => ModelDefinition::from_json_str(&content),
    }
    .with_context(|| format!("failed to parse model {}", path.display()))?;

    Ok(model)
}

/// Load the store configuration, or the in-memory default.
pub fn load_config(path: Option<&Path>) -> Result<StoreConfig> {
    match path {
        Some(path) => StoreConfig::load(path)
            .with_context(|| format!("failed to load config {}", path.display())),
        None => Ok(StoreConfig::default()),
    }
}

/// Parse a command-line parameter: JSON if it parses, text otherwise.
pub fn parse_param(raw: &str) -> SqlValue {
    match serde_json::from_str::<serde_json::Value>(raw) {
        Ok(value) => SqlValue::from_json(&value),
        Err(_) => SqlValue::Text(raw.to_string()),
    }
}
