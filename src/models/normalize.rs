//! Normalization helpers
//!
//! Coerce loosely typed JSON fields into defaulted, range-safe values.
//! Nothing here fails: every field degrades to its fallback.

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::models::SnowLevel;

// == Normalize Trait ==
/// Builds a fully populated record from arbitrary JSON input.
///
/// Unknown fields are ignored and a non-object input behaves like `{}`.
/// Implementations are idempotent: normalizing the serialized output of a
/// normalized record yields an equal record.
pub trait Normalize: Sized {
    fn normalize(input: &Value) -> Self;
}

/// Field lookup over an input that may not be an object at all.
pub(crate) struct Fields<'a>(Option<&'a Map<String, Value>>);

impl<'a> Fields<'a> {
    pub fn of(input: &'a Value) -> Self {
        Self(input.as_object())
    }

    pub fn get(&self, name: &str) -> Option<&'a Value> {
        self.0.and_then(|fields| fields.get(name))
    }

    pub fn string(&self, name: &str, fallback: &str) -> String {
        to_string_or(self.get(name), fallback)
    }

    pub fn number(&self, name: &str, fallback: f64) -> f64 {
        to_number_or(self.get(name), fallback)
    }

    pub fn clamped(&self, name: &str, min: f64, max: f64) -> f64 {
        self.number(name, 0.0).clamp(min, max)
    }

    pub fn non_negative(&self, name: &str) -> f64 {
        self.number(name, 0.0).max(0.0)
    }

    pub fn level(&self, name: &str) -> SnowLevel {
        self.get(name)
            .and_then(Value::as_str)
            .and_then(SnowLevel::from_label)
            .unwrap_or_default()
    }

    /// Timestamp string, defaulting to the current instant.
    pub fn timestamp(&self, name: &str) -> String {
        match self.get(name) {
            Some(Value::Null) | None => now_iso(),
            value => to_string_or(value, &now_iso()),
        }
    }
}

/// Best-effort numeric coercion.
///
/// Numbers pass through, numeric strings are parsed (blank counts as zero),
/// booleans become 1 or 0. Anything else, or a non-finite result, yields
/// `fallback`.
pub fn to_number_or(value: Option<&Value>, fallback: f64) -> f64 {
    let parsed = match value {
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                Some(0.0)
            } else {
                trimmed.parse::<f64>().ok()
            }
        }
        Some(Value::Bool(b)) => Some(if *b { 1.0 } else { 0.0 }),
        _ => None,
    };
    parsed.filter(|n| n.is_finite()).unwrap_or(fallback)
}

/// Best-effort string coercion. Scalars are stringified, the rest falls back.
pub fn to_string_or(value: Option<&Value>, fallback: &str) -> String {
    match value {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Number(n)) => n.to_string(),
        Some(Value::Bool(b)) => b.to_string(),
        _ => fallback.to_string(),
    }
}

/// Current instant as ISO-8601 UTC with millisecond precision.
pub fn now_iso() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_to_number_or() {
        assert_eq!(to_number_or(Some(&json!(12.5)), 0.0), 12.5);
        assert_eq!(to_number_or(Some(&json!(" 7 ")), 0.0), 7.0);
        assert_eq!(to_number_or(Some(&json!("")), 9.0), 0.0);
        assert_eq!(to_number_or(Some(&json!(true)), 0.0), 1.0);
        assert_eq!(to_number_or(Some(&json!("abc")), 3.0), 3.0);
        assert_eq!(to_number_or(Some(&json!("inf")), 3.0), 3.0);
        assert_eq!(to_number_or(Some(&json!(null)), 3.0), 3.0);
        assert_eq!(to_number_or(Some(&json!([1])), 3.0), 3.0);
        assert_eq!(to_number_or(None, 3.0), 3.0);
    }

    #[test]
    fn test_to_string_or() {
        assert_eq!(to_string_or(Some(&json!("x")), "d"), "x");
        assert_eq!(to_string_or(Some(&json!(42)), "d"), "42");
        assert_eq!(to_string_or(Some(&json!(false)), "d"), "false");
        assert_eq!(to_string_or(Some(&json!({"a": 1})), "d"), "d");
        assert_eq!(to_string_or(None, "d"), "d");
    }

    #[test]
    fn test_fields_on_non_object() {
        let input = json!([1, 2]);
        let fields = Fields::of(&input);
        assert!(fields.get("anything").is_none());
        assert_eq!(fields.level("snowLevel"), SnowLevel::None);
    }

    #[test]
    fn test_now_iso_shape() {
        let now = now_iso();
        assert!(now.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&now).is_ok());
    }
}
