use serde::{Deserialize, Serialize};
use std::fmt;

use crate::field::FieldType;

/// A field's current (or default) value.
///
/// The untagged representation keeps persisted values as natural JSON
/// scalars; `Empty` round-trips as `null`. Variant order matters for
/// deserialization: booleans and numbers are claimed before strings.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum FieldValue {
    Bool(bool),
    Number(f64),
    /// Free text, dates, and select/radio choices all travel as strings.
    Text(String),
    /// No value: an untouched input, or a derived field that has not been
    /// computed (or whose last computation failed).
    Empty,
}

impl FieldValue {
    pub fn text(value: impl Into<String>) -> Self {
        FieldValue::Text(value.into())
    }

    /// The starting value for an untouched field of the given type.
    /// Checkboxes start unchecked rather than empty so they always hold a
    /// boolean; derived fields start uncomputed.
    pub fn empty_for(field_type: FieldType) -> Self {
        match field_type {
            FieldType::Checkbox => FieldValue::Bool(false),
            FieldType::Derived => FieldValue::Empty,
            _ => FieldValue::Text(String::new()),
        }
    }

    /// True when the value is unset or an empty string. `Bool(false)` is a
    /// present value, not an empty one.
    pub fn is_empty(&self) -> bool {
        match self {
            FieldValue::Empty => true,
            FieldValue::Text(text) => text.is_empty(),
            FieldValue::Bool(_) | FieldValue::Number(_) => false,
        }
    }

    /// The string content, when the value is string-shaped.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            FieldValue::Bool(flag) => Some(*flag),
            _ => None,
        }
    }

    /// Numeric reading of the value: numbers as-is, numeric text parsed,
    /// booleans as 0/1. `None` for empty or non-numeric content.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(number) => Some(*number),
            FieldValue::Text(text) => text.trim().parse().ok(),
            FieldValue::Bool(flag) => Some(if *flag { 1.0 } else { 0.0 }),
            FieldValue::Empty => None,
        }
    }

    /// Variant name for diagnostics.
    pub fn type_name(&self) -> &'static str {
        match self {
            FieldValue::Bool(_) => "bool",
            FieldValue::Number(_) => "number",
            FieldValue::Text(_) => "text",
            FieldValue::Empty => "empty",
        }
    }
}

impl fmt::Display for FieldValue {
    /// Renders the value the way a read-only control shows it: `Empty` as
    /// the empty string, numbers without a trailing fraction when integral.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Bool(flag) => write!(f, "{}", flag),
            FieldValue::Number(number) => write!(f, "{}", number),
            FieldValue::Text(text) => write!(f, "{}", text),
            FieldValue::Empty => Ok(()),
        }
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Bool(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn untagged_round_trip() {
        let values = vec![
            FieldValue::Bool(true),
            FieldValue::Number(2.5),
            FieldValue::text("hello"),
            FieldValue::Empty,
        ];
        let json = serde_json::to_string(&values).expect("serialize values");
        assert_eq!(json, r#"[true,2.5,"hello",null]"#);
        let round: Vec<FieldValue> = serde_json::from_str(&json).expect("deserialize values");
        assert_eq!(round, values);
    }

    #[test]
    fn numeric_reading_covers_text_and_bool() {
        assert_eq!(FieldValue::text(" 12.5 ").as_number(), Some(12.5));
        assert_eq!(FieldValue::Bool(true).as_number(), Some(1.0));
        assert_eq!(FieldValue::Bool(false).as_number(), Some(0.0));
        assert_eq!(FieldValue::text("twelve").as_number(), None);
        assert_eq!(FieldValue::Empty.as_number(), None);
    }

    #[test]
    fn unchecked_checkbox_is_present_not_empty() {
        assert!(!FieldValue::Bool(false).is_empty());
        assert!(FieldValue::Empty.is_empty());
        assert!(FieldValue::text("").is_empty());
    }

    #[test]
    fn starting_values_match_field_types() {
        assert_eq!(
            FieldValue::empty_for(FieldType::Checkbox),
            FieldValue::Bool(false)
        );
        assert_eq!(FieldValue::empty_for(FieldType::Derived), FieldValue::Empty);
        assert_eq!(FieldValue::empty_for(FieldType::Text), FieldValue::text(""));
    }

    #[test]
    fn display_renders_empty_as_blank_and_integral_numbers_bare() {
        assert_eq!(FieldValue::Empty.to_string(), "");
        assert_eq!(FieldValue::Number(7.0).to_string(), "7");
        assert_eq!(FieldValue::Number(2.5).to_string(), "2.5");
    }
}
