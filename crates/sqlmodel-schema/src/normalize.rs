//! Field normalization: raw descriptor in, canonical [`Column`] out.
//!
//! The physical type is canonicalized into a small vocabulary (`INTEGER`,
//! `NUMBER`, `VARCHAR(n)`, `CHAR(n)`, `TEXT`, or an uppercase passthrough),
//! the logical type is inferred from it, and a `maxLength` rule is inferred
//! from any `(VAR)CHAR(n)` bound the caller has not already constrained.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::field::{DefaultValue, FieldDescriptor, Rules};

/// Physical type used when neither `dbType` nor `type` is declared.
pub const DEFAULT_DB_TYPE: &str = "VARCHAR";

/// Length bound appended to a bare `VARCHAR` / `CHAR`.
pub const DEFAULT_CHAR_LENGTH: u32 = 45;

/// Logical type for character columns.
pub const STRING_TYPE: &str = "string";

/// Logical type for numeric columns.
pub const NUMBER_TYPE: &str = "number";

static CHAR_BOUND: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:VAR)?CHAR\((\d+)\)").expect("char bound pattern is valid")
});

/// A normalized column, ready for DDL generation.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Column {
    pub name: String,
    #[serde(rename = "type")]
    pub field_type: String,
    pub db_type: String,
    pub rules: Rules,
    pub require: bool,
    pub primary_key: bool,
    pub auto_increment: bool,
    pub unique: bool,
    pub index: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub default_value: Option<DefaultValue>,
}

impl Column {
    /// The `maxLength` rule as an integer, if set.
    pub fn max_length(&self) -> Option<u64> {
        self.rules.get("maxLength").and_then(|v| v.as_u64())
    }
}

/// Normalize a field descriptor into a [`Column`].
///
/// The descriptor is left untouched.
pub fn normalize(field: &FieldDescriptor) -> Column {
    let mut rules = field.rules.clone().unwrap_or_default();

    let declared_type = non_blank(field.field_type.as_deref());
    let raw = non_blank(field.db_type.as_deref())
        .or(declared_type)
        .unwrap_or(DEFAULT_DB_TYPE);
    let db_type = canonical_db_type(raw);

    let length_ruled = rules.contains_key("maxLength") || rules.contains_key("rangeLength");
    if !length_ruled {
        if let Some(len) = char_bound(&db_type) {
            rules.insert("maxLength".to_string(), len.into());
        }
    }

    let field_type = match infer_logical_type(&db_type) {
        Some(inferred) => inferred.to_string(),
        None => declared_type
            .map(str::to_string)
            .unwrap_or_else(|| db_type.to_lowercase()),
    };

    Column {
        name: field.name.clone(),
        field_type,
        db_type,
        rules,
        require: field.require,
        primary_key: field.primary_key,
        auto_increment: field.auto_increment,
        unique: field.unique,
        index: field.index,
        default_value: field.default_value.clone(),
    }
}

/// Canonicalize a physical column type.
///
/// ```
/// use sqlmodel_schema::normalize::canonical_db_type;
///
/// assert_eq!(canonical_db_type(" int8 "), "INTEGER");
/// assert_eq!(canonical_db_type("double"), "NUMBER");
/// assert_eq!(canonical_db_type("varchar"), "VARCHAR(45)");
/// assert_eq!(canonical_db_type("blob"), "BLOB");
/// ```
pub fn canonical_db_type(raw: &str) -> String {
    let upper = raw.trim().to_uppercase();

    if upper.starts_with("INT") {
        return "INTEGER".to_string();
    }
    if ["FLOAT", "DOUBLE", "SHORT"]
        .iter()
        .any(|p| upper.starts_with(p))
    {
        return "NUMBER".to_string();
    }
    if upper == "VARCHAR" || upper == "CHAR" {
        return format!("{upper}({DEFAULT_CHAR_LENGTH})");
    }
    upper
}

/// Extract `n` from a `VARCHAR(n)` / `CHAR(n)` type.
pub fn char_bound(db_type: &str) -> Option<u64> {
    CHAR_BOUND
        .captures(db_type)
        .and_then(|caps| caps[1].parse().ok())
}

/// Blank type strings count as unset.
fn non_blank(value: Option<&str>) -> Option<&str> {
    value.filter(|s| !s.trim().is_empty())
}

fn infer_logical_type(db_type: &str) -> Option<&'static str> {
    if ["VARCHAR", "CHAR", "TEXT"]
        .iter()
        .any(|p| db_type.starts_with(p))
    {
        Some(STRING_TYPE)
    } else if ["INT", "NUM", "FLOAT", "DOUBLE", "SHORT"]
        .iter()
        .any(|p| db_type.starts_with(p))
    {
        Some(NUMBER_TYPE)
    } else {
        None
    }
}
