//! Row identifiers

use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::Value;

/// Identifies a row within a dataset.
///
/// Keys stay attached to rows across sorting, filtering and pagination, so
/// selection is tracked by key rather than by position.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RowKey {
    Int(i64),
    Guid(Uuid),
    Text(String),
}

impl RowKey {
    /// Converts a field value into a key.
    ///
    /// Returns `None` for values that cannot identify a row (null, booleans,
    /// non-integral numbers, nested JSON).
    pub fn from_value(value: &Value) -> Option<Self> {
        match value {
            Value::Int(i) => Some(RowKey::Int(*i)),
            Value::Float(f) if f.is_finite() && f.fract() == 0.0 => Some(RowKey::Int(*f as i64)),
            Value::String(s) => Some(RowKey::Text(s.clone())),
            Value::Guid(id) => Some(RowKey::Guid(*id)),
            _ => None,
        }
    }
}

impl fmt::Display for RowKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RowKey::Int(i) => write!(f, "{}", i),
            RowKey::Guid(id) => write!(f, "{}", id.hyphenated()),
            RowKey::Text(s) => f.write_str(s),
        }
    }
}

/// Parses command-line style keys: integers first, then GUIDs, then text.
impl FromStr for RowKey {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(i) = s.parse::<i64>() {
            return Ok(RowKey::Int(i));
        }
        if let Ok(id) = Uuid::parse_str(s) {
            return Ok(RowKey::Guid(id));
        }
        Ok(RowKey::Text(s.to_string()))
    }
}

impl From<i64> for RowKey {
    fn from(v: i64) -> Self {
        RowKey::Int(v)
    }
}

impl From<i32> for RowKey {
    fn from(v: i32) -> Self {
        RowKey::Int(v.into())
    }
}

impl From<&str> for RowKey {
    fn from(v: &str) -> Self {
        RowKey::Text(v.to_string())
    }
}

impl From<String> for RowKey {
    fn from(v: String) -> Self {
        RowKey::Text(v)
    }
}

impl From<Uuid> for RowKey {
    fn from(v: Uuid) -> Self {
        RowKey::Guid(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_prefers_integers() {
        assert_eq!("12".parse::<RowKey>(), Ok(RowKey::Int(12)));
        assert_eq!("abc".parse::<RowKey>(), Ok(RowKey::Text("abc".into())));
    }

    #[test]
    fn test_parse_guid() {
        let id = Uuid::new_v4();
        assert_eq!(id.to_string().parse::<RowKey>(), Ok(RowKey::Guid(id)));
    }

    #[test]
    fn test_from_value() {
        assert_eq!(RowKey::from_value(&Value::Int(3)), Some(RowKey::Int(3)));
        assert_eq!(RowKey::from_value(&Value::Float(3.0)), Some(RowKey::Int(3)));
        assert_eq!(RowKey::from_value(&Value::Float(3.5)), None);
        assert_eq!(RowKey::from_value(&Value::Null), None);
        assert_eq!(RowKey::from_value(&Value::Bool(true)), None);
    }
}
