use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, SchemaError};
use crate::field::{FieldType, FormField};
use crate::graph;

/// A named, ordered collection of field definitions.
///
/// Field order is load-bearing: it drives render order, the order rules are
/// evaluated in, and the order derived fields recompute in. All mutation goes
/// through the methods below so the duplicate-id invariant holds at every
/// step, not just at save time.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FormSchema {
    #[serde(default)]
    pub name: String,
    /// Stamped when the schema is first named.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub fields: Vec<FormField>,
}

impl FormSchema {
    /// A named schema stamped with the current time.
    pub fn new(name: impl Into<String>) -> Self {
        let mut schema = Self::default();
        schema.set_name(name);
        schema
    }

    /// Rename the schema and stamp its creation time.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.name = name.into();
        self.created_at = Some(Utc::now());
    }

    /// Append a field. Rejects ids already present in the schema.
    pub fn add_field(&mut self, field: FormField) -> Result<()> {
        if self.fields.iter().any(|existing| existing.id == field.id) {
            return Err(SchemaError::DuplicateFieldId { id: field.id });
        }
        self.fields.push(field);
        Ok(())
    }

    /// Replace the field at `index`. The replacement may keep its old id or
    /// take a new one, as long as the new id collides with no other field.
    pub fn update_field(&mut self, index: usize, field: FormField) -> Result<()> {
        if index >= self.fields.len() {
            return Err(SchemaError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        let collision = self
            .fields
            .iter()
            .enumerate()
            .any(|(position, existing)| position != index && existing.id == field.id);
        if collision {
            return Err(SchemaError::DuplicateFieldId { id: field.id });
        }
        self.fields[index] = field;
        Ok(())
    }

    /// Remove and return the field at `index`; later fields shift up.
    pub fn delete_field(&mut self, index: usize) -> Result<FormField> {
        if index >= self.fields.len() {
            return Err(SchemaError::IndexOutOfRange {
                index,
                len: self.fields.len(),
            });
        }
        Ok(self.fields.remove(index))
    }

    /// The field with the given id, if any.
    pub fn field(&self, id: &str) -> Option<&FormField> {
        self.fields.iter().find(|field| field.id == id)
    }

    /// The position of the field with the given id.
    pub fn field_position(&self, id: &str) -> Option<usize> {
        self.fields.iter().position(|field| field.id == id)
    }

    /// Fields of type `Derived`, in schema order.
    pub fn derived_fields(&self) -> impl Iterator<Item = &FormField> {
        self.fields
            .iter()
            .filter(|field| field.field_type == FieldType::Derived)
    }

    /// Full structural check, run before the schema is persisted.
    ///
    /// Verifies id uniqueness, that choice fields carry options, that the
    /// derived flag and the derivation config agree, that every declared
    /// parent exists, and that derived fields form no dependency cycle.
    pub fn validate_for_save(&self) -> Result<()> {
        let mut ids: BTreeSet<&str> = BTreeSet::new();
        for field in &self.fields {
            if !ids.insert(field.id.as_str()) {
                return Err(SchemaError::DuplicateFieldId {
                    id: field.id.clone(),
                });
            }
        }
        for field in &self.fields {
            if field.field_type.has_options() && field.options.is_empty() {
                return Err(SchemaError::EmptyOptions {
                    id: field.id.clone(),
                });
            }
            match (field.field_type, field.derived.as_ref()) {
                (FieldType::Derived, None) => {
                    return Err(SchemaError::MissingDerivedConfig {
                        id: field.id.clone(),
                    });
                }
                (FieldType::Derived, Some(config)) => {
                    for parent in &config.parent_fields {
                        if *parent == field.id {
                            return Err(SchemaError::CyclicDerivation {
                                id: field.id.clone(),
                            });
                        }
                        if !ids.contains(parent.as_str()) {
                            return Err(SchemaError::UnknownParentField {
                                id: field.id.clone(),
                                parent: parent.clone(),
                            });
                        }
                    }
                }
                (_, Some(_)) => {
                    return Err(SchemaError::UnexpectedDerivedConfig {
                        id: field.id.clone(),
                    });
                }
                (_, None) => {}
            }
        }
        graph::check_acyclic(self)
    }
}
