//! Lenient deserializers for backend payloads.
//!
//! Ids arrive as numbers from some endpoints and as strings from others;
//! money arrives as numbers or formatted strings.

use serde::de::{self, Deserializer};
use serde::Deserialize;
use serde_json::Value;

use super::currency::currency_value;

/// Deserialize a number-or-string id into a `String`.
pub fn id_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(de::Error::custom(format!("expected id, got {}", other))),
    }
}

/// Optional variant of [`id_string`]; `null` maps to `None`.
pub fn opt_id_string<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Null => Ok(None),
        Value::String(s) => Ok(Some(s)),
        Value::Number(n) => Ok(Some(n.to_string())),
        other => Err(de::Error::custom(format!("expected id, got {}", other))),
    }
}

/// Deserialize a money cell; sentinels become `0.0`.
pub fn currency<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(currency_value(&value))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(deserialize_with = "id_string")]
        id: String,
        #[serde(default, deserialize_with = "opt_id_string")]
        parent: Option<String>,
        #[serde(default, deserialize_with = "currency")]
        amount: f64,
    }

    #[test]
    fn test_numeric_and_string_ids() {
        let p: Probe = serde_json::from_str(r#"{"id": 17, "parent": "4", "amount": "$1,050.25"}"#).unwrap();
        assert_eq!(p.id, "17");
        assert_eq!(p.parent.as_deref(), Some("4"));
        assert_eq!(p.amount, 1050.25);

        let p: Probe = serde_json::from_str(r#"{"id": "abc", "parent": null}"#).unwrap();
        assert_eq!(p.id, "abc");
        assert_eq!(p.parent, None);
        assert_eq!(p.amount, 0.0);
    }

    #[test]
    fn test_bad_id_rejected() {
        assert!(serde_json::from_str::<Probe>(r#"{"id": [1]}"#).is_err());
    }
}
