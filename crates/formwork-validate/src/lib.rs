//! Field validation rules for form schemas.
//!
//! Validation is pure: functions read a field definition plus the current
//! value and return messages, never mutating session state. Blur-time
//! single-field checks and submit-time whole-form checks share the same
//! rule implementations, so the two can never disagree.

mod rules;
mod validator;

pub use validator::{validate_all, validate_field};
