use thiserror::Error;

/// Formula failures. During a recompute pass these are caught per derived
/// field: the failing field degrades to an empty value and the pass moves on
/// to the next field, so one bad formula never poisons the rest of the form.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("unexpected character '{found}' at byte {at}")]
    Lex { found: char, at: usize },
    #[error("parse error at token {at}: {message}")]
    Parse { message: String, at: usize },
    #[error("unknown identifier: {name}")]
    UnknownIdentifier { name: String },
    #[error("parent field {name} holds a non-numeric value")]
    NonNumericParent { name: String },
    #[error("division by zero")]
    DivisionByZero,
    #[error("result is not a finite number")]
    NonFinite,
}

pub type Result<T> = std::result::Result<T, FormulaError>;
