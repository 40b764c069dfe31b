use serde::{de::DeserializeOwned, Serialize};
use std::hash::Hash;

/// Numeric backend identifier wrapped in a per-entity newtype.
///
/// Ids travel through URL paths and `<select>` values as strings, so every
/// id type round-trips through `as_string`/`from_string`.
pub trait EntityId:
    Clone + Copy + PartialEq + Eq + Hash + Serialize + DeserializeOwned + std::fmt::Debug
{
    fn new(value: i64) -> Self;

    fn value(&self) -> i64;

    fn as_string(&self) -> String {
        self.value().to_string()
    }

    fn from_string(s: &str) -> Result<Self, String> {
        s.trim()
            .parse::<i64>()
            .map(Self::new)
            .map_err(|e| format!("Invalid id '{}': {}", s, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::a003_brand::BrandId;

    #[test]
    fn test_id_round_trip_through_string() {
        let id = BrandId::from_string(" 42 ").unwrap();
        assert_eq!(id.value(), 42);
        assert_eq!(id.as_string(), "42");
    }

    #[test]
    fn test_invalid_id_is_rejected() {
        assert!(BrandId::from_string("abc").is_err());
        assert!(BrandId::from_string("").is_err());
    }
}
