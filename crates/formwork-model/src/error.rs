use thiserror::Error;

/// Structural schema errors. All of these are rejected synchronously at the
/// mutation or save call that would introduce them; a persisted schema never
/// contains any of these defects.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error("duplicate field id: {id}")]
    DuplicateFieldId { id: String },
    #[error("field index {index} out of range (schema has {len} fields)")]
    IndexOutOfRange { index: usize, len: usize },
    #[error("cyclic derivation involving field {id}")]
    CyclicDerivation { id: String },
    #[error("derived field {id} references unknown parent {parent}")]
    UnknownParentField { id: String, parent: String },
    #[error("field {id} must define at least one option")]
    EmptyOptions { id: String },
    #[error("derived field {id} has no derivation config")]
    MissingDerivedConfig { id: String },
    #[error("field {id} carries a derivation config but is not derived")]
    UnexpectedDerivedConfig { id: String },
}

pub type Result<T> = std::result::Result<T, SchemaError>;
