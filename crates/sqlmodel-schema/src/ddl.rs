//! DDL generation for normalized tables.
//!
//! Output is a single string of `;`-terminated statements with no separator
//! between them, meant to be run as one batch:
//!
//! ```text
//! CREATE TABLE `users` (
//!   `id` INTEGER NOT NULL PRIMARY KEY AUTOINCREMENT,
//!   `email` VARCHAR(255) UNIQUE);CREATE INDEX `email_INDEX` on users(email);
//! ```
//!
//! Identifiers and default values are interpolated as given. Model metadata
//! is trusted input.

use crate::normalize::Column;
use crate::table::TableSpec;

/// Generate `CREATE TABLE` plus one `CREATE INDEX` per index of `spec`.
pub fn generate_create_table(spec: &TableSpec) -> String {
    let segments: Vec<String> = spec.columns.iter().map(column_clause).collect();

    // No FOREIGN KEY clauses; models carry no references.
    let mut sql = format!(
        "CREATE TABLE `{}` (\n  {});",
        spec.table,
        segments.join(",\n  ")
    );

    for index in spec.all_indices() {
        sql.push_str(&format!(
            "CREATE INDEX `{}_INDEX` on {}({});",
            index.name, spec.table, index.columns
        ));
    }

    sql
}

/// Render one column definition.
pub fn column_clause(column: &Column) -> String {
    let mut clause = format!("`{}` {}", column.name, column.db_type.to_uppercase());

    if column.require || column.primary_key {
        clause.push_str(" NOT NULL");
    }
    if let Some(default) = &column.default_value {
        clause.push_str(&format!(" DEFAULT '{default}'"));
    }
    if column.primary_key {
        clause.push_str(" PRIMARY KEY");
    }
    if column.auto_increment {
        clause.push_str(" AUTOINCREMENT");
    }
    if column.unique {
        clause.push_str(" UNIQUE");
    }

    clause
}
