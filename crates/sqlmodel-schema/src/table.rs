//! Model metadata and its normalized table form.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::SchemaResult;
use crate::field::FieldDescriptor;
use crate::normalize::{Column, normalize};

/// Columns covered by an explicit index: one name or a list of names.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum IndexColumns {
    Single(String),
    Multiple(Vec<String>),
}

impl IndexColumns {
    /// The comma-joined column list used inside `on table(...)`.
    pub fn joined(&self) -> String {
        match self {
            Self::Single(column) => column.clone(),
            Self::Multiple(columns) => columns.join(","),
        }
    }
}

impl From<&str> for IndexColumns {
    fn from(column: &str) -> Self {
        Self::Single(column.to_string())
    }
}

impl From<Vec<&str>> for IndexColumns {
    fn from(columns: Vec<&str>) -> Self {
        Self::Multiple(columns.into_iter().map(str::to_string).collect())
    }
}

/// A model as described by the ORM: table name, ordered fields and
/// explicit indices in declaration order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ModelDefinition {
    pub table: String,
    #[serde(default)]
    pub fields: Vec<FieldDescriptor>,
    #[serde(default)]
    pub indices: IndexMap<String, IndexColumns>,
}

impl ModelDefinition {
    pub fn new(table: impl Into<String>) -> Self {
        Self {
            table: table.into(),
            ..Self::default()
        }
    }

    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    pub fn with_index(mut self, name: impl Into<String>, columns: impl Into<IndexColumns>) -> Self {
        self.indices.insert(name.into(), columns.into());
        self
    }

    /// Parse a model from JSON.
    pub fn from_json_str(s: &str) -> SchemaResult<Self> {
        Ok(serde_json::from_str(s)?)
    }

    /// Parse a model from TOML.
    pub fn from_toml_str(s: &str) -> SchemaResult<Self> {
        Ok(toml::from_str(s)?)
    }
}

/// A named index over one or more columns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct IndexSpec {
    pub name: String,
    /// Comma-joined column list.
    pub columns: String,
}

impl IndexSpec {
    pub fn new(name: impl Into<String>, columns: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: columns.into(),
        }
    }
}

/// A normalized table: the input to DDL generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableSpec {
    pub table: String,
    pub columns: Vec<Column>,
    /// Explicit, model-level indices only. Field-level `index` flags are
    /// carried on the columns.
    pub indices: Vec<IndexSpec>,
}

impl TableSpec {
    /// Normalize every field of `model`.
    pub fn from_model(model: &ModelDefinition) -> Self {
        let columns: Vec<Column> = model.fields.iter().map(normalize).collect();
        let indices = model
            .indices
            .iter()
            .map(|(name, columns)| IndexSpec::new(name.clone(), columns.joined()))
            .collect();

        debug!(
            table = %model.table,
            columns = columns.len(),
            "normalized model fields"
        );

        Self {
            table: model.table.clone(),
            columns,
            indices,
        }
    }

    /// Look up a column by name.
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }

    /// Explicit indices followed by field-derived ones, in emission order.
    pub fn all_indices(&self) -> Vec<IndexSpec> {
        let mut indices = self.indices.clone();
        indices.extend(
            self.columns
                .iter()
                .filter(|c| c.index)
                .map(|c| IndexSpec::new(c.name.clone(), c.name.clone())),
        );
        indices
    }
}
