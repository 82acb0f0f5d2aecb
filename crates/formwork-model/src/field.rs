use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::value::FieldValue;

/// Field type of a form control. This is a closed enumeration: renderers and
/// validators dispatch on it exhaustively, so unknown types are rejected at
/// deserialization rather than surfacing later.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldType {
    /// Single-line free text.
    Text,
    /// Numeric input.
    Number,
    /// Multi-line free text.
    Textarea,
    /// One choice from a dropdown; requires a non-empty options list.
    Select,
    /// One choice from a radio group; requires a non-empty options list.
    Radio,
    /// Boolean toggle.
    Checkbox,
    /// Calendar date input.
    Date,
    /// Read-only value computed from other fields via a formula.
    Derived,
}

impl FieldType {
    /// All field types, in the order a builder palette presents them.
    pub const ALL: [FieldType; 8] = [
        FieldType::Text,
        FieldType::Number,
        FieldType::Textarea,
        FieldType::Select,
        FieldType::Radio,
        FieldType::Checkbox,
        FieldType::Date,
        FieldType::Derived,
    ];

    /// Returns true for types that choose from an options list.
    pub fn has_options(&self) -> bool {
        matches!(self, FieldType::Select | FieldType::Radio)
    }

    /// The input control a renderer uses for this type.
    pub fn control(&self) -> ControlKind {
        match self {
            FieldType::Text => ControlKind::TextInput,
            FieldType::Number => ControlKind::NumberInput,
            FieldType::Textarea => ControlKind::TextArea,
            FieldType::Select => ControlKind::Dropdown,
            FieldType::Radio => ControlKind::RadioGroup,
            FieldType::Checkbox => ControlKind::CheckboxInput,
            FieldType::Date => ControlKind::DatePicker,
            FieldType::Derived => ControlKind::ComputedDisplay,
        }
    }

    /// The canonical lowercase name used on the wire.
    pub fn as_str(&self) -> &'static str {
        match self {
            FieldType::Text => "text",
            FieldType::Number => "number",
            FieldType::Textarea => "textarea",
            FieldType::Select => "select",
            FieldType::Radio => "radio",
            FieldType::Checkbox => "checkbox",
            FieldType::Date => "date",
            FieldType::Derived => "derived",
        }
    }
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for FieldType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "text" => Ok(FieldType::Text),
            "number" => Ok(FieldType::Number),
            "textarea" => Ok(FieldType::Textarea),
            "select" => Ok(FieldType::Select),
            "radio" => Ok(FieldType::Radio),
            "checkbox" => Ok(FieldType::Checkbox),
            "date" => Ok(FieldType::Date),
            "derived" => Ok(FieldType::Derived),
            _ => Err(format!("Unknown field type: {}", s)),
        }
    }
}

/// Input control categories a presentation layer dispatches on. Derived
/// fields render as read-only output, never as an editable control.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ControlKind {
    TextInput,
    NumberInput,
    TextArea,
    Dropdown,
    RadioGroup,
    CheckboxInput,
    DatePicker,
    ComputedDisplay,
}

/// Optional per-field validation rules. Absent rules are simply not applied;
/// a field with no `FieldValidation` at all accepts any value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FieldValidation {
    #[serde(default, skip_serializing_if = "is_false")]
    pub required: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub min_length: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_length: Option<u32>,
    #[serde(default, skip_serializing_if = "is_false")]
    pub email: bool,
    #[serde(default, skip_serializing_if = "is_false")]
    pub password_rule: bool,
}

impl FieldValidation {
    /// Rule set containing only `required`.
    pub fn required() -> Self {
        Self {
            required: true,
            ..Self::default()
        }
    }
}

fn is_false(flag: &bool) -> bool {
    !*flag
}

// A present `null` is an explicit `Empty` default; only an absent key means
// no default. Plain `Option` would read the `null` back as `None` and the
// field would not survive a reload intact.
fn null_as_empty<'de, D>(deserializer: D) -> Result<Option<FieldValue>, D::Error>
where
    D: Deserializer<'de>,
{
    FieldValue::deserialize(deserializer).map(Some)
}

/// Derivation config for a computed field: the parent fields it reads and
/// the arithmetic formula combining them. Parents are referenced in the
/// formula by id, as whole identifiers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DerivedConfig {
    pub parent_fields: Vec<String>,
    pub formula: String,
}

impl DerivedConfig {
    pub fn new<I, S>(parent_fields: I, formula: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            parent_fields: parent_fields.into_iter().map(Into::into).collect(),
            formula: formula.into(),
        }
    }
}

/// One field definition inside a form schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FormField {
    /// Schema-wide unique identifier. Also the name derived formulas use to
    /// reference this field.
    pub id: String,
    /// Human-readable label, displayed next to the control and quoted in
    /// validation messages.
    pub label: String,
    #[serde(rename = "type")]
    pub field_type: FieldType,
    /// Initial value a fill session seeds this field with. An explicit
    /// `Empty` default persists as a literal `null`, distinct from having
    /// no default at all.
    #[serde(default, deserialize_with = "null_as_empty", skip_serializing_if = "Option::is_none")]
    pub default_value: Option<FieldValue>,
    /// Choices for select/radio controls.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub options: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub validation: Option<FieldValidation>,
    /// Present exactly when `field_type` is [`FieldType::Derived`].
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived: Option<DerivedConfig>,
}

impl FormField {
    /// A plain field with no default, options, validation, or derivation.
    pub fn new(id: impl Into<String>, label: impl Into<String>, field_type: FieldType) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            field_type,
            default_value: None,
            options: Vec::new(),
            validation: None,
            derived: None,
        }
    }

    /// Shorthand for a derived field with its parents and formula.
    pub fn derived<I, S>(
        id: impl Into<String>,
        label: impl Into<String>,
        parent_fields: I,
        formula: impl Into<String>,
    ) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut field = Self::new(id, label, FieldType::Derived);
        field.derived = Some(DerivedConfig::new(parent_fields, formula));
        field
    }

    pub fn with_validation(mut self, validation: FieldValidation) -> Self {
        self.validation = Some(validation);
        self
    }

    pub fn with_options<I, S>(mut self, options: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options = options.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_default(mut self, value: FieldValue) -> Self {
        self.default_value = Some(value);
        self
    }
}
