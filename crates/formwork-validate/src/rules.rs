//! Individual rule predicates.

use formwork_model::FieldValue;
use regex::Regex;

/// Missing for the purposes of `required`: no value at all, or an empty
/// string. An unchecked checkbox holds `false`, which is a present value.
pub(crate) fn is_missing(value: Option<&FieldValue>) -> bool {
    value.is_none_or(FieldValue::is_empty)
}

/// `local@domain.tld` shape: exactly one `@`, no whitespace, and a dot
/// somewhere after the `@`.
pub(crate) fn is_valid_email(value: &str) -> bool {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
        .map(|re| re.is_match(value))
        .unwrap_or(false)
}

/// At least eight characters, at least one of them an ASCII digit.
pub(crate) fn meets_password_rule(value: &str) -> bool {
    value.chars().count() >= 8 && value.chars().any(|c| c.is_ascii_digit())
}
