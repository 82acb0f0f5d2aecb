use thiserror::Error;

use formwork_model::SchemaError;
use formwork_persistence::PersistenceError;

/// Failures surfaced by studio commands. Schema errors mean the command was
/// rejected and nothing changed; persistence errors mean the schema was
/// valid but could not be written.
#[derive(Debug, Error)]
pub enum StudioError {
    #[error(transparent)]
    Schema(#[from] SchemaError),
    #[error(transparent)]
    Persistence(#[from] PersistenceError),
}

pub type Result<T> = std::result::Result<T, StudioError>;
