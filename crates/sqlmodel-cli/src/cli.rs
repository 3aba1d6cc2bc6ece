//! CLI argument definitions for sqlmodel.
//!
//! All `clap` structures live here so that `main.rs` stays focused on
//! dispatching subcommands.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// sqlmodel -- model-driven SQLite schemas.
#[derive(Parser)]
#[command(
    name = "sqlmodel",
    version,
    about = "Generate SQLite DDL from model files and run statements against a store",
    long_about = "Reads model metadata (JSON or TOML), normalizes field types, emits \
                  CREATE TABLE / CREATE INDEX statements and executes SQL against a \
                  configured SQLite store."
)]
pub struct Cli {
    /// Log at debug level (statement tracing) unless RUST_LOG is set.
    #[arg(long, short, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Print the DDL generated for a model file.
    Ddl {
        /// Model file (`.json` or `.toml`).
        model: PathBuf,
    },

    /// Print the normalized columns of a model file as JSON.
    Normalize {
        /// Model file (`.json` or `.toml`).
        model: PathBuf,
    },

    /// Create the tables for one or more models in the configured store.
    Apply {
        /// Store configuration file. Without it the store is in memory.
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// Model files (`.json` or `.toml`).
        #[arg(required = true)]
        models: Vec<PathBuf>,
    },

    /// Execute a mutating statement and print the result as JSON.
    Exec {
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// SQL statement.
        sql: String,

        /// Positional parameters, each parsed as JSON (falls back to text).
        params: Vec<String>,
    },

    /// Run a read statement and print the rows as JSON.
    Query {
        #[arg(long, short)]
        config: Option<PathBuf>,

        /// SQL statement.
        sql: String,

        /// Positional parameters, each parsed as JSON (falls back to text).
        params: Vec<String>,
    },
}
