//! Formwork engine core: build form schemas, persist them, and run fill
//! sessions with validation and derived-field recomputation.
//!
//! The crate ties the workspace together. [`FormStudio`] holds the schema
//! being built and talks to the repository; [`FormSession`] holds the values
//! of one fill, revalidating on blur and recomputing derived fields on every
//! edit.
//!
//! # Example
//!
//! ```
//! use formwork_core::FormStudio;
//! use formwork_model::{FieldType, FieldValidation, FormField};
//! use formwork_persistence::{MemoryStore, SchemaRepository};
//!
//! let mut studio = FormStudio::new(SchemaRepository::new(MemoryStore::new()));
//! studio.set_name("Contact");
//! studio.add_field(
//!     FormField::new("email", "Email", FieldType::Text)
//!         .with_validation(FieldValidation::required()),
//! )?;
//! studio.save()?;
//!
//! let mut session = studio.preview(Some("Contact")).expect("saved schema");
//! session.update("email", "team@example.com".into());
//! assert!(session.submit().is_accepted());
//! # Ok::<(), formwork_core::StudioError>(())
//! ```

mod error;
mod session;
mod studio;

pub use error::{Result, StudioError};
pub use session::{FormSession, SubmitOutcome};
pub use studio::FormStudio;
