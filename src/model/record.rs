//! Generic record types shared by the storage and repository layers.
//!
//! Rows come back from the store as field-name-keyed maps rather than typed
//! structs: the generic store is table-agnostic, and the UI layer renders
//! whatever columns a query produced. [`Value`] covers the SQLite storage
//! classes the schema uses (no blobs).

use std::collections::BTreeMap;

use rusqlite::types::{ToSqlOutput, ValueRef};
use rusqlite::ToSql;
use serde::{Deserialize, Serialize};

/// A single row, keyed by column name.
pub type Row = BTreeMap<String, Value>;

/// One cell of a row.
///
/// Serializes untagged, so a row renders as plain JSON
/// (`{"name": "Acme", "is_active": 1, "notes": null}`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Value {
    Null,
    Integer(i64),
    Real(f64),
    Text(String),
}

impl Value {
    /// The integer payload, if this is an integer cell.
    #[must_use]
    pub const fn as_i64(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            _ => None,
        }
    }

    /// The text payload, if this is a text cell.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Text(s) => Some(s.as_str()),
            _ => None,
        }
    }

    #[must_use]
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl From<i64> for Value {
    fn from(n: i64) -> Self {
        Self::Integer(n)
    }
}

impl From<f64> for Value {
    fn from(x: f64) -> Self {
        Self::Real(x)
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Self::Text(s)
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(opt: Option<T>) -> Self {
        opt.map_or(Self::Null, Into::into)
    }
}

impl From<ValueRef<'_>> for Value {
    fn from(v: ValueRef<'_>) -> Self {
        match v {
            ValueRef::Null => Self::Null,
            ValueRef::Integer(n) => Self::Integer(n),
            ValueRef::Real(x) => Self::Real(x),
            ValueRef::Text(s) => Self::Text(String::from_utf8_lossy(s).into_owned()),
            // The schema stores no blobs; treat one as an absent value.
            ValueRef::Blob(_) => Self::Null,
        }
    }
}

impl ToSql for Value {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            Self::Null => ToSqlOutput::from(rusqlite::types::Null),
            Self::Integer(n) => ToSqlOutput::from(*n),
            Self::Real(x) => ToSqlOutput::from(*x),
            Self::Text(s) => ToSqlOutput::from(s.as_str()),
        })
    }
}

/// Normalize an optional text field for storage: absent and blank strings
/// both store as NULL, so "no value" is always represented the same way.
#[must_use]
pub fn text_or_null(field: Option<&str>) -> Value {
    match field {
        Some(s) if !s.trim().is_empty() => Value::Text(s.to_string()),
        _ => Value::Null,
    }
}

/// Render a row as a JSON object for the UI boundary.
#[must_use]
pub fn row_to_json(row: &Row) -> serde_json::Value {
    serde_json::to_value(row).unwrap_or(serde_json::Value::Null)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_or_null_blanks() {
        assert_eq!(text_or_null(None), Value::Null);
        assert_eq!(text_or_null(Some("")), Value::Null);
        assert_eq!(text_or_null(Some("   ")), Value::Null);
        assert_eq!(text_or_null(Some("DE")), Value::Text("DE".to_string()));
    }

    #[test]
    fn test_row_serializes_untagged() {
        let mut row = Row::new();
        row.insert("name".to_string(), Value::from("Acme GmbH"));
        row.insert("is_active".to_string(), Value::from(1_i64));
        row.insert("notes".to_string(), Value::Null);

        let json = row_to_json(&row);
        assert_eq!(json["name"], "Acme GmbH");
        assert_eq!(json["is_active"], 1);
        assert!(json["notes"].is_null());
    }

    #[test]
    fn test_option_into_value() {
        let none: Option<String> = None;
        assert_eq!(Value::from(none), Value::Null);
        assert_eq!(Value::from(Some(7_i64)), Value::Integer(7));
    }
}
