pub mod error;
pub mod field;
pub mod graph;
pub mod schema;
pub mod value;

pub use error::{Result, SchemaError};
pub use field::{ControlKind, DerivedConfig, FieldType, FieldValidation, FormField};
pub use schema::FormSchema;
pub use value::FieldValue;
