//! Whole-schema recomputation of derived fields.

use std::collections::BTreeMap;

use tracing::debug;

use formwork_model::{DerivedConfig, FieldType, FieldValue, FormSchema};

use crate::error::{FormulaError, Result};
use crate::eval::Resolver;
use crate::parser::Parser;

/// Resolves identifiers for one derived field: only its declared parents are
/// visible. Absent and empty parents read as zero; a parent holding
/// non-numeric content is an evaluation failure, not a silent zero.
struct ParentScope<'a> {
    config: &'a DerivedConfig,
    values: &'a BTreeMap<String, FieldValue>,
}

impl Resolver for ParentScope<'_> {
    fn resolve(&self, name: &str) -> Result<f64> {
        if !self.config.parent_fields.iter().any(|parent| parent == name) {
            return Err(FormulaError::UnknownIdentifier {
                name: name.to_string(),
            });
        }
        match self.values.get(name) {
            None => Ok(0.0),
            Some(value) if value.is_empty() => Ok(0.0),
            Some(value) => value
                .as_number()
                .ok_or_else(|| FormulaError::NonNumericParent {
                    name: name.to_string(),
                }),
        }
    }
}

/// Recompute every derived field of `schema` from scratch against `values`.
///
/// Fields are evaluated in schema order over a working view of the mapping,
/// so a derived field later in the schema sees the fresh value of one
/// computed earlier in the same pass. Each field's result is independent: a
/// failure degrades that one field to [`FieldValue::Empty`] and the pass
/// continues. Returns the new value for every derived field; the caller
/// applies them to its own state in one step.
pub fn recompute(
    schema: &FormSchema,
    values: &BTreeMap<String, FieldValue>,
) -> BTreeMap<String, FieldValue> {
    let mut working = values.clone();
    let mut computed = BTreeMap::new();
    for field in &schema.fields {
        if field.field_type != FieldType::Derived {
            continue;
        }
        let Some(config) = field.derived.as_ref() else {
            continue;
        };
        let value = match compute_one(config, &working) {
            Ok(number) => FieldValue::Number(number),
            Err(error) => {
                debug!(field = %field.id, %error, "derived field evaluation failed");
                FieldValue::Empty
            }
        };
        working.insert(field.id.clone(), value.clone());
        computed.insert(field.id.clone(), value);
    }
    computed
}

fn compute_one(config: &DerivedConfig, values: &BTreeMap<String, FieldValue>) -> Result<f64> {
    let expr = Parser::parse(&config.formula)?;
    expr.eval(&ParentScope { config, values })
}
