//! Fill-session value state.
//!
//! A [`FormSession`] owns the value mapping and inline errors for one fill
//! (or preview) of a schema. It lives for that fill only and is never
//! persisted; saving a schema stores its definition, not anyone's answers.

use std::collections::BTreeMap;

use formwork_formula::recompute;
use formwork_model::{FieldValue, FormSchema};

/// Value state for one fill of a form.
#[derive(Debug, Clone)]
pub struct FormSession {
    schema: FormSchema,
    values: BTreeMap<String, FieldValue>,
    errors: BTreeMap<String, String>,
}

/// Outcome of a submit attempt.
#[derive(Debug, Clone, PartialEq)]
pub enum SubmitOutcome {
    /// Every rule passed; carries the submitted value mapping.
    Accepted(BTreeMap<String, FieldValue>),
    /// At least one field failed; carries field id to message.
    Rejected(BTreeMap<String, String>),
}

impl SubmitOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmitOutcome::Accepted(_))
    }
}

impl FormSession {
    /// Open a session over `schema`.
    ///
    /// Every field is seeded with its default value, or the
    /// type-appropriate starting value when it has none: checkboxes start
    /// unchecked, derived fields start uncomputed, everything else starts
    /// as empty text.
    pub fn new(schema: FormSchema) -> Self {
        let mut values = BTreeMap::new();
        for field in &schema.fields {
            let value = field
                .default_value
                .clone()
                .unwrap_or_else(|| FieldValue::empty_for(field.field_type));
            values.insert(field.id.clone(), value);
        }
        Self {
            schema,
            values,
            errors: BTreeMap::new(),
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    /// Set one field's value and recompute every derived field.
    ///
    /// The field's inline error is cleared on edit. Derived results are
    /// applied in one step after the full pass, so the mapping a caller
    /// observes is always fully recomputed, never halfway.
    pub fn update(&mut self, field_id: &str, value: FieldValue) {
        self.values.insert(field_id.to_string(), value);
        self.errors.remove(field_id);
        let derived = recompute(&self.schema, &self.values);
        self.values.extend(derived);
    }

    /// Blur-time validation of one field.
    ///
    /// Stores the message as the field's inline error (or clears it) and
    /// returns it.
    pub fn validate_field(&mut self, field_id: &str) -> Option<&str> {
        let field = self.schema.field(field_id)?;
        match formwork_validate::validate_field(field, self.values.get(field_id)) {
            Some(message) => {
                self.errors.insert(field_id.to_string(), message);
                self.errors.get(field_id).map(String::as_str)
            }
            None => {
                self.errors.remove(field_id);
                None
            }
        }
    }

    /// Submit-time validation of the whole form.
    ///
    /// Replaces the inline error map with the full result. The form's
    /// answers are released to the caller only when everything passes.
    pub fn submit(&mut self) -> SubmitOutcome {
        let errors = formwork_validate::validate_all(&self.schema, &self.values);
        self.errors = errors.clone();
        if errors.is_empty() {
            SubmitOutcome::Accepted(self.values.clone())
        } else {
            SubmitOutcome::Rejected(errors)
        }
    }

    /// Current value of one field.
    pub fn value(&self, field_id: &str) -> Option<&FieldValue> {
        self.values.get(field_id)
    }

    /// Current inline error of one field.
    pub fn error(&self, field_id: &str) -> Option<&str> {
        self.errors.get(field_id).map(String::as_str)
    }

    pub fn values(&self) -> &BTreeMap<String, FieldValue> {
        &self.values
    }

    pub fn errors(&self) -> &BTreeMap<String, String> {
        &self.errors
    }

    /// Owned copy of the full current mapping.
    pub fn snapshot(&self) -> BTreeMap<String, FieldValue> {
        self.values.clone()
    }
}
