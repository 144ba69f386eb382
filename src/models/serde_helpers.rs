//! Deserializers for loosely typed backend fields

use serde::{Deserialize, Deserializer};

/// `null` (or a missing field, with `#[serde(default)]`) becomes `T::default()`
pub fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts a JSON string or number and keeps its textual form
pub fn string_or_number<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Loose {
        Text(String),
        Int(i64),
        Float(f64),
        Flag(bool),
    }

    Ok(Option::<Loose>::deserialize(deserializer)?.map(|value| match value {
        Loose::Text(text) => text,
        Loose::Int(n) => n.to_string(),
        Loose::Float(n) => n.to_string(),
        Loose::Flag(b) => b.to_string(),
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Deserialize)]
    struct Sample {
        #[serde(default, deserialize_with = "null_as_default")]
        price: f64,
        #[serde(default, deserialize_with = "string_or_number")]
        weight: Option<String>,
    }

    #[test]
    fn test_nulls_and_numbers() {
        let sample: Sample = serde_json::from_str(r#"{"price": null, "weight": 2.5}"#).unwrap();
        assert_eq!(sample.price, 0.0);
        assert_eq!(sample.weight.as_deref(), Some("2.5"));

        let sample: Sample = serde_json::from_str(r#"{"weight": "3 kg"}"#).unwrap();
        assert_eq!(sample.weight.as_deref(), Some("3 kg"));

        let sample: Sample = serde_json::from_str(r#"{"price": 4, "weight": null}"#).unwrap();
        assert_eq!(sample.price, 4.0);
        assert!(sample.weight.is_none());
    }
}
