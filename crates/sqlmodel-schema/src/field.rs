//! Raw field descriptors as supplied by the ORM layer.
//!
//! A [`FieldDescriptor`] is deliberately loose: either the logical `type`, the
//! physical `dbType`, both, or neither may be set. See
//! [`normalize`](crate::normalize::normalize) for how it becomes a
//! [`Column`](crate::normalize::Column).

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Validation rules keyed by rule name (`maxLength`, `rangeLength`, ...).
pub type Rules = BTreeMap<String, serde_json::Value>;

/// One column as declared on a model.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FieldDescriptor {
    pub name: String,

    /// Logical application type, e.g. `"string"` or `"number"`.
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub field_type: Option<String>,

    /// Physical column type, e.g. `"varchar(64)"`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub db_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rules: Option<Rules>,

    #[serde(default)]
    pub require: bool,

    #[serde(default)]
    pub primary_key: bool,

    #[serde(default)]
    pub auto_increment: bool,

    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub index: bool,

    /// `Some` whenever the key is present, even when its value is `null`.
    #[serde(
        default,
        deserialize_with = "deserialize_present",
        skip_serializing_if = "Option::is_none"
    )]
    pub default_value: Option<DefaultValue>,
}

impl FieldDescriptor {
    /// Create a descriptor with only a name set.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn with_type(mut self, field_type: impl Into<String>) -> Self {
        self.field_type = Some(field_type.into());
        self
    }

    pub fn with_db_type(mut self, db_type: impl Into<String>) -> Self {
        self.db_type = Some(db_type.into());
        self
    }

    pub fn with_rule(mut self, name: impl Into<String>, value: serde_json::Value) -> Self {
        self.rules
            .get_or_insert_with(Rules::new)
            .insert(name.into(), value);
        self
    }

    pub fn required(mut self) -> Self {
        self.require = true;
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.primary_key = true;
        self
    }

    pub fn auto_increment(mut self) -> Self {
        self.auto_increment = true;
        self
    }

    pub fn unique(mut self) -> Self {
        self.unique = true;
        self
    }

    pub fn indexed(mut self) -> Self {
        self.index = true;
        self
    }

    pub fn with_default(mut self, value: impl Into<DefaultValue>) -> Self {
        self.default_value = Some(value.into());
        self
    }
}

/// A column default. `Null` is a present-but-null default, distinct from
/// having no default at all.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Null,
    Bool(bool),
    Integer(i64),
    Real(f64),
    Text(String),
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Null => f.write_str("null"),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Integer(i) => write!(f, "{i}"),
            Self::Real(r) => write!(f, "{r}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for DefaultValue {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl From<i64> for DefaultValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<f64> for DefaultValue {
    fn from(r: f64) -> Self {
        Self::Real(r)
    }
}

impl From<bool> for DefaultValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

// `Option<T>` maps an explicit `null` to `None`; route through the untagged
// enum instead so presence alone decides.
fn deserialize_present<'de, D>(deserializer: D) -> Result<Option<DefaultValue>, D::Error>
where
    D: Deserializer<'de>,
{
    DefaultValue::deserialize(deserializer).map(Some)
}
