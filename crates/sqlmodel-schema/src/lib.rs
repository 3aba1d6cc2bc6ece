//! # sqlmodel-schema
//!
//! Turns an ORM's model metadata into SQLite DDL.
//!
//! ```text
//! ModelDefinition ──normalize──▶ TableSpec ──generate_create_table──▶ DDL text
//! (loose fields)                 (Columns)                            (batch)
//! ```
//!
//! ## Quick start
//!
//! ```
//! use sqlmodel_schema::{FieldDescriptor, ModelDefinition, TableSpec, generate_create_table};
//!
//! let model = ModelDefinition::new("notes")
//!     .with_field(FieldDescriptor::new("id").with_db_type("int").primary_key().auto_increment())
//!     .with_field(FieldDescriptor::new("title").indexed());
//!
//! let sql = generate_create_table(&TableSpec::from_model(&model));
//! assert!(sql.starts_with("CREATE TABLE `notes`"));
//! ```

pub mod ddl;
pub mod error;
pub mod field;
pub mod normalize;
pub mod table;

// ── re-exports ───────────────────────────────────────────────────────

pub use ddl::{column_clause, generate_create_table};
pub use error::{SchemaError, SchemaResult};
pub use field::{DefaultValue, FieldDescriptor, Rules};
pub use normalize::{Column, normalize};
pub use table::{IndexColumns, IndexSpec, ModelDefinition, TableSpec};
