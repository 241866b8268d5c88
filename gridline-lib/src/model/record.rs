//! Dynamic record row

use std::collections::HashMap;

use super::{RowKey, TableRow, Value};
use crate::error::FieldError;

/// A dynamic row backed by a field map.
///
/// Records are what the CLI and tests load from JSON: every object becomes a
/// record keyed by the value at a configurable key field.
///
/// # Example
///
/// ```
/// use gridline_lib::model::{Record, RowKey, TableRow, Value};
///
/// let record = Record::new(1).set("name", "Ann").set("reports", 3i64);
/// assert_eq!(record.key(), RowKey::Int(1));
/// assert_eq!(record.get("name"), Some(&Value::from("Ann")));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    key: RowKey,
    fields: HashMap<String, Value>,
}

impl Record {
    /// Creates a new empty record with the given key.
    pub fn new(key: impl Into<RowKey>) -> Self {
        Self {
            key: key.into(),
            fields: HashMap::new(),
        }
    }

    /// Builds a record from a JSON object, taking the key from `key_field`.
    ///
    /// The key field stays in the field map so that it can be displayed and
    /// sorted like any other column.
    pub fn from_json(value: serde_json::Value, key_field: &str) -> Result<Self, FieldError> {
        let map = match value {
            serde_json::Value::Object(map) => map,
            other => {
                return Err(FieldError::NotAnObject {
                    actual: Value::from(other).type_name(),
                });
            }
        };

        let fields: HashMap<String, Value> = map
            .into_iter()
            .map(|(name, value)| (name, Value::from(value)))
            .collect();

        let key_value = fields
            .get(key_field)
            .filter(|v| !v.is_null())
            .ok_or_else(|| FieldError::missing_key(key_field))?;
        let key = RowKey::from_value(key_value)
            .ok_or_else(|| FieldError::invalid_key(key_field, key_value.type_name()))?;

        Ok(Self { key, fields })
    }

    /// Builds records from a JSON array of objects.
    pub fn from_json_array(
        values: Vec<serde_json::Value>,
        key_field: &str,
    ) -> Result<Vec<Self>, FieldError> {
        values
            .into_iter()
            .map(|value| Self::from_json(value, key_field))
            .collect()
    }

    // =========================================================================
    // Field access
    // =========================================================================

    /// Returns a reference to the field value, if it exists.
    pub fn get(&self, field: &str) -> Option<&Value> {
        self.fields.get(field)
    }

    /// Returns a reference to all fields.
    pub fn fields(&self) -> &HashMap<String, Value> {
        &self.fields
    }

    /// Sets a field value (builder pattern).
    pub fn set(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(field.into(), value.into());
        self
    }

    /// Serializes the record back into a JSON object.
    pub fn to_json(&self) -> serde_json::Value {
        let map = self
            .fields
            .iter()
            .map(|(name, value)| {
                let json = serde_json::to_value(value).unwrap_or(serde_json::Value::Null);
                (name.clone(), json)
            })
            .collect();
        serde_json::Value::Object(map)
    }
}

impl TableRow for Record {
    type Key = RowKey;

    fn key(&self) -> RowKey {
        self.key.clone()
    }

    fn field(&self, name: &str) -> Option<Value> {
        self.fields.get(name).cloned()
    }
}
