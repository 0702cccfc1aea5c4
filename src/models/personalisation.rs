//! Template placeholder substitutions.
//!
//! The service accepts a flat JSON object whose values are strings, numbers
//! or booleans. [`PersonalisationValue`] closes over exactly those three.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

/// Placeholder name to substitution value, serialized as a flat JSON object
pub type Personalisation = BTreeMap<String, PersonalisationValue>;

/// A single substitution value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum PersonalisationValue {
    Bool(bool),
    Number(serde_json::Number),
    Text(String),
}

impl From<&str> for PersonalisationValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_string())
    }
}

impl From<String> for PersonalisationValue {
    fn from(value: String) -> Self {
        Self::Text(value)
    }
}

impl From<bool> for PersonalisationValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

impl From<i64> for PersonalisationValue {
    fn from(value: i64) -> Self {
        Self::Number(value.into())
    }
}

impl From<u64> for PersonalisationValue {
    fn from(value: u64) -> Self {
        Self::Number(value.into())
    }
}

impl From<i32> for PersonalisationValue {
    fn from(value: i32) -> Self {
        Self::Number(value.into())
    }
}

impl fmt::Display for PersonalisationValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersonalisationValue::Bool(value) => write!(f, "{}", value),
            PersonalisationValue::Number(value) => write!(f, "{}", value),
            PersonalisationValue::Text(value) => f.write_str(value),
        }
    }
}

/// Builds a [`Personalisation`] from `(name, value)` pairs.
///
/// ```
/// use notify_rs::models::personalisation;
///
/// let p = personalisation([("name", "someone")]);
/// assert_eq!(p["name"].to_string(), "someone");
/// ```
pub fn personalisation<K, V, I>(pairs: I) -> Personalisation
where
    K: Into<String>,
    V: Into<PersonalisationValue>,
    I: IntoIterator<Item = (K, V)>,
{
    pairs
        .into_iter()
        .map(|(key, value)| (key.into(), value.into()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_serializes_as_flat_object() {
        let mut p = personalisation([("name", "someone")]);
        p.insert("count".to_string(), 3.into());
        p.insert("urgent".to_string(), true.into());

        let value = serde_json::to_value(&p).unwrap();
        assert_eq!(value, json!({"name": "someone", "count": 3, "urgent": true}));
    }

    #[test]
    fn test_deserializes_each_variant() {
        let p: Personalisation =
            serde_json::from_value(json!({"a": "text", "b": 1.5, "c": false})).unwrap();

        assert_eq!(p["a"], PersonalisationValue::Text("text".to_string()));
        assert!(matches!(p["b"], PersonalisationValue::Number(_)));
        assert_eq!(p["c"], PersonalisationValue::Bool(false));
    }

    #[test]
    fn test_display() {
        assert_eq!(PersonalisationValue::from(42i64).to_string(), "42");
        assert_eq!(PersonalisationValue::from(true).to_string(), "true");
        assert_eq!(PersonalisationValue::from("Foo").to_string(), "Foo");
    }
}
