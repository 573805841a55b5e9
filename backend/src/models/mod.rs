//! Domain models for the Tabulate transformation stack.
//!
//! - [`Matrix`] - Ordered rows of ordered string cells
//! - [`Record`] - Keyed string fields plus an optional stable [`RecordId`]
//!
//! A matrix makes no distinction between header and data rows. Header-ness is
//! a convention of the callers: sorting keeps row 0 in place and the record
//! adapter always reads row 0 as field names.

use std::fmt;

use serde::de::{self, Deserializer};
use serde::ser::{SerializeMap, Serializer};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Matrix
// =============================================================================

/// One row of cells.
pub type Row = Vec<String>;

/// Ordered rows of ordered string cells. Rows may differ in length.
pub type Matrix = Vec<Row>;

/// Length of the longest row, 0 for an empty matrix.
pub fn width(matrix: &[Row]) -> usize {
    matrix.iter().map(Vec::len).max().unwrap_or(0)
}

/// Build a matrix from string literals.
pub fn matrix_of<R, C>(rows: R) -> Matrix
where
    R: IntoIterator<Item = C>,
    C: IntoIterator,
    C::Item: Into<String>,
{
    rows.into_iter()
        .map(|row| row.into_iter().map(Into::into).collect())
        .collect()
}

// =============================================================================
// Record Identity
// =============================================================================

/// Name of the identity field in serialized records.
pub const ID_FIELD: &str = "id";

/// Stable identity of a record across transformations.
///
/// Callers may assign numeric or string ids; records without one get their
/// zero-based position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    /// Numeric id (positional ids are always numeric).
    Index(u64),
    /// Caller-assigned string id.
    Key(String),
}

impl From<usize> for RecordId {
    fn from(index: usize) -> Self {
        RecordId::Index(index as u64)
    }
}

impl From<&str> for RecordId {
    fn from(key: &str) -> Self {
        RecordId::Key(key.to_string())
    }
}

impl From<String> for RecordId {
    fn from(key: String) -> Self {
        RecordId::Key(key)
    }
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Index(i) => write!(f, "{}", i),
            RecordId::Key(k) => write!(f, "{}", k),
        }
    }
}

// =============================================================================
// Record
// =============================================================================

/// A keyed row: string fields in insertion order plus an optional id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Record {
    /// Stable identity, `None` until assigned by the caller or the adapter.
    pub id: Option<RecordId>,
    fields: Vec<(String, String)>,
}

impl Record {
    /// Create an empty record without id.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty record with the given id.
    pub fn with_id(id: impl Into<RecordId>) -> Self {
        Self {
            id: Some(id.into()),
            fields: Vec::new(),
        }
    }

    /// Add a field (builder style).
    pub fn field(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.insert(name, value);
        self
    }

    /// Set a field. An existing field keeps its position.
    ///
    /// Setting [`ID_FIELD`] assigns the record id instead. Only a canonical
    /// unsigned integer becomes [`RecordId::Index`], anything else is kept
    /// verbatim as [`RecordId::Key`].
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();

        if name == ID_FIELD {
            self.id = Some(match value.parse::<u64>() {
                Ok(n) if n.to_string() == value => RecordId::Index(n),
                _ => RecordId::Key(value),
            });
            return;
        }

        match self.fields.iter_mut().find(|(k, _)| *k == name) {
            Some((_, v)) => *v = value,
            None => self.fields.push((name, value)),
        }
    }

    /// Get a field value.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Field names in order, without the id.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(|(k, _)| k.as_str())
    }

    /// Fields in order.
    pub fn fields(&self) -> &[(String, String)] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

impl Serialize for Record {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let len = self.fields.len() + usize::from(self.id.is_some());
        let mut map = serializer.serialize_map(Some(len))?;
        if let Some(ref id) = self.id {
            map.serialize_entry(ID_FIELD, id)?;
        }
        for (k, v) in &self.fields {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for Record {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = Map::<String, Value>::deserialize(deserializer)?;
        let mut record = Record::new();

        for (key, value) in raw {
            if key == ID_FIELD {
                record.id = match value {
                    Value::Null => None,
                    Value::Number(n) => match n.as_u64() {
                        Some(i) => Some(RecordId::Index(i)),
                        None => Some(RecordId::Key(n.to_string())),
                    },
                    Value::String(s) => Some(RecordId::Key(s)),
                    other => {
                        return Err(de::Error::custom(format!(
                            "record id must be a number or a string, got {}",
                            other
                        )))
                    }
                };
                continue;
            }

            let cell = match value {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                Value::Null => String::new(),
                other => {
                    return Err(de::Error::custom(format!(
                        "field '{}' must be a scalar, got {}",
                        key, other
                    )))
                }
            };
            record.fields.push((key, cell));
        }

        Ok(record)
    }
}
