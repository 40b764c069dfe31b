//! Deserializers for fields the backend sends either as JSON numbers or as
//! strings (`"price": "10.00"` vs `"price": 10`).

use serde::{Deserialize, Deserializer};
use serde_json::Value;

fn value_to_string(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        other => Some(other.to_string()),
    }
}

/// Number or string, `null` becomes an empty string.
pub fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).unwrap_or_default())
}

/// Number or string, `null` stays `None`.
pub fn opt_string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(value_to_string(value).filter(|s| !s.trim().is_empty()))
}

/// Number or numeric string. Anything unparsable is treated as absent.
pub fn opt_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    Ok(match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
    .filter(|v| v.is_finite()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Deserialize;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "string_or_number")]
        price: String,
        #[serde(default, deserialize_with = "opt_string_or_number")]
        capacity: Option<String>,
        #[serde(default, deserialize_with = "opt_f64")]
        stock: Option<f64>,
    }

    #[test]
    fn test_numbers_and_strings_are_accepted() {
        let p: Probe =
            serde_json::from_str(r#"{"price": 10.5, "capacity": "500", "stock": "12"}"#).unwrap();
        assert_eq!(p.price, "10.5");
        assert_eq!(p.capacity.as_deref(), Some("500"));
        assert_eq!(p.stock, Some(12.0));

        let p: Probe =
            serde_json::from_str(r#"{"price": "10.00", "capacity": 330, "stock": 3}"#).unwrap();
        assert_eq!(p.price, "10.00");
        assert_eq!(p.capacity.as_deref(), Some("330"));
        assert_eq!(p.stock, Some(3.0));
    }

    #[test]
    fn test_nulls_and_missing_fields() {
        let p: Probe = serde_json::from_str(r#"{"price": null, "capacity": ""}"#).unwrap();
        assert_eq!(p.price, "");
        assert_eq!(p.capacity, None);
        assert_eq!(p.stock, None);

        let p: Probe = serde_json::from_str(r#"{"stock": "n/a"}"#).unwrap();
        assert_eq!(p.stock, None);
    }
}
