//! CLI entry point for sqlmodel.
//!
//! This binary provides the `sqlmodel` command with subcommands for
//! generating DDL from model files and running statements against a store.

mod cli;
mod helpers;

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use sqlmodel_schema::{TableSpec, generate_create_table};
use sqlmodel_store::{SqlValue, SqliteStore};
use tracing::{error, info};

use crate::cli::{Cli, Commands};
use crate::helpers::{init_tracing, load_config, load_model, parse_param};

// ---------------------------------------------------------------------------
// Main
// ---------------------------------------------------------------------------

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(if cli.verbose { "debug" } else { "info" });

    let result = match cli.command {
        Commands::Ddl { model } => cmd_ddl(&model),
        Commands::Normalize { model } => cmd_normalize(&model),
        Commands::Apply { config, models } => cmd_apply(config.as_deref(), &models).await,
        Commands::Exec {
            config,
            sql,
            params,
        } => cmd_exec(config.as_deref(), &sql, &params).await,
        Commands::Query {
            config,
            sql,
            params,
        } => cmd_query(config.as_deref(), &sql, &params).await,
    };

    if let Err(e) = &result {
        error!(error = %e, "command failed");
    }
    result
}

// ---------------------------------------------------------------------------
// Schema subcommands
// ---------------------------------------------------------------------------

fn cmd_ddl(model: &Path) -> Result<()> {
    let model = load_model(model)?;
    println!("{}", generate_create_table(&TableSpec::from_model(&model)));
    Ok(())
}

fn cmd_normalize(model: &Path) -> Result<()> {
    let model = load_model(model)?;
    let spec = TableSpec::from_model(&model);
    println!("{}", serde_json::to_string_pretty(&spec.columns)?);
    Ok(())
}

// ---------------------------------------------------------------------------
// Store subcommands
// ---------------------------------------------------------------------------

async fn open_store(config: Option<&Path>) -> Result<SqliteStore> {
    let mut store = SqliteStore::new(load_config(config)?);
    store.init().await.context("failed to open store")?;
    Ok(store)
}

async fn cmd_apply(config: Option<&Path>, models: &[PathBuf]) -> Result<()> {
    let specs = models
        .iter()
        .map(|path| load_model(path).map(|m| TableSpec::from_model(&m)))
        .collect::<Result<Vec<_>>>()?;

    let mut store = open_store(config).await?;
    for spec in &specs {
        store
            .create_table(spec)
            .await
            .with_context(|| format!("failed to create table {}", spec.table))?;
        info!(table = %spec.table, "table created");
    }
    store.close().await?;
    Ok(())
}

async fn cmd_exec(config: Option<&Path>, sql: &str, params: &[String]) -> Result<()> {
    let params: Vec<SqlValue> = params.iter().map(|p| parse_param(p)).collect();
    let mut store = open_store(config).await?;
    let result = store.exec(sql, &params).await?;
    store.close().await?;
    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

async fn cmd_query(config: Option<&Path>, sql: &str, params: &[String]) -> Result<()> {
    let params: Vec<SqlValue> = params.iter().map(|p| parse_param(p)).collect();
    let mut store = open_store(config).await?;
    let rows = store.query(sql, &params).await?;
    store.close().await?;
    let rows: Vec<serde_json::Value> = rows.iter().map(|r| r.to_json()).collect();
    println!("{}", serde_json::to_string_pretty(&rows)?);
    Ok(())
}
