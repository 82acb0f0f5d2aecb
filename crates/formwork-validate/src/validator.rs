//! Per-field validation.
//!
//! Rules come from each field's [`FieldValidation`] and run in a fixed
//! order:
//!
//! 1. **required** - value must be present (unchecked checkbox counts as
//!    present)
//! 2. **min_length** / **max_length** - string length bounds
//! 3. **email** - `local@domain.tld` shape
//! 4. **password_rule** - at least 8 chars including a digit
//!
//! The first failing rule wins; a field reports at most one message at a
//! time. Length, email, and password rules only inspect string content;
//! email and password additionally skip empty strings, so an optional email
//! field left blank is fine.

use std::collections::BTreeMap;

use formwork_model::{FieldValue, FormField, FormSchema};

use crate::rules;

/// Validate one field's value against its rules.
///
/// `value` is the entry from the session mapping, or `None` when the field
/// has never been touched. Returns the first failing rule's message, or
/// `None` when the value passes.
pub fn validate_field(field: &FormField, value: Option<&FieldValue>) -> Option<String> {
    let checks = field.validation.as_ref()?;
    let label = &field.label;

    if checks.required && rules::is_missing(value) {
        return Some(format!("{label} is required"));
    }
    if let Some(min) = checks.min_length
        && let Some(text) = string_content(value)
        && (text.chars().count() as u32) < min
    {
        return Some(format!("{label} must be at least {min} characters"));
    }
    if let Some(max) = checks.max_length
        && let Some(text) = string_content(value)
        && (text.chars().count() as u32) > max
    {
        return Some(format!("{label} must be at most {max} characters"));
    }
    if checks.email
        && let Some(text) = non_empty_string_content(value)
        && !rules::is_valid_email(text)
    {
        return Some("Invalid email format".to_string());
    }
    if checks.password_rule
        && let Some(text) = non_empty_string_content(value)
        && !rules::meets_password_rule(text)
    {
        return Some("Password must be >=8 chars and include a number".to_string());
    }
    None
}

/// Validate every field of the schema, in schema order.
///
/// Only failing fields appear in the result, keyed by field id; an empty map
/// means the form may be submitted.
pub fn validate_all(
    schema: &FormSchema,
    values: &BTreeMap<String, FieldValue>,
) -> BTreeMap<String, String> {
    let mut errors = BTreeMap::new();
    for field in &schema.fields {
        if let Some(message) = validate_field(field, values.get(&field.id)) {
            errors.insert(field.id.clone(), message);
        }
    }
    errors
}

fn string_content(value: Option<&FieldValue>) -> Option<&str> {
    value.and_then(FieldValue::as_text)
}

fn non_empty_string_content(value: Option<&FieldValue>) -> Option<&str> {
    string_content(value).filter(|text| !text.is_empty())
}
