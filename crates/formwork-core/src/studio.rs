//! Builder-side commands over the current schema and the saved collection.
//!
//! [`FormStudio`] is the explicit state container: one schema under
//! construction plus a cache of the saved collection, persisting through an
//! injected repository. There is no ambient global store; whoever constructs
//! the studio decides where schemas live.

use tracing::info;

use formwork_model::{FormField, FormSchema};
use formwork_persistence::{BlobStore, SchemaRepository};

use crate::error::Result;
use crate::session::FormSession;

/// Form builder state: the schema being edited and the saved collection.
#[derive(Debug, Clone)]
pub struct FormStudio<S> {
    repository: SchemaRepository<S>,
    current: FormSchema,
    saved: Vec<FormSchema>,
}

impl<S: BlobStore> FormStudio<S> {
    /// Open a studio over `repository`, starting from a fresh unnamed
    /// schema and an unloaded saved-collection cache.
    pub fn new(repository: SchemaRepository<S>) -> Self {
        Self {
            repository,
            current: FormSchema::default(),
            saved: Vec::new(),
        }
    }

    /// The schema currently being edited.
    pub fn current(&self) -> &FormSchema {
        &self.current
    }

    /// The saved collection as of the last `save` or `load_all`.
    pub fn saved(&self) -> &[FormSchema] {
        &self.saved
    }

    pub fn repository(&self) -> &SchemaRepository<S> {
        &self.repository
    }

    /// Drop the schema being edited and start over from a blank one. The
    /// saved collection is untouched.
    pub fn new_form(&mut self) {
        self.current = FormSchema::default();
    }

    /// Name the schema being edited, stamping its creation time.
    pub fn set_name(&mut self, name: impl Into<String>) {
        self.current.set_name(name);
    }

    /// Append a field to the schema being edited.
    pub fn add_field(&mut self, field: FormField) -> Result<()> {
        self.current.add_field(field)?;
        Ok(())
    }

    /// Replace the field at `index` in the schema being edited.
    pub fn update_field(&mut self, index: usize, field: FormField) -> Result<()> {
        self.current.update_field(index, field)?;
        Ok(())
    }

    /// Remove and return the field at `index` in the schema being edited.
    pub fn delete_field(&mut self, index: usize) -> Result<FormField> {
        Ok(self.current.delete_field(index)?)
    }

    /// Validate the current schema and append it to the persisted
    /// collection.
    ///
    /// Structural checks, including the derived-field cycle check, run
    /// before anything is written: an invalid schema is never persisted.
    /// The schema stays current after a save so editing can continue.
    pub fn save(&mut self) -> Result<()> {
        self.current.validate_for_save()?;
        self.saved = self.repository.append(self.current.clone())?;
        info!(
            name = %self.current.name,
            fields = self.current.fields.len(),
            "form schema saved"
        );
        Ok(())
    }

    /// Refresh the saved-collection cache from the repository.
    pub fn load_all(&mut self) -> &[FormSchema] {
        self.saved = self.repository.load_all();
        &self.saved
    }

    /// Make `schema` the current one and open a fill session over it.
    pub fn load_for_preview(&mut self, schema: FormSchema) -> FormSession {
        self.current = schema.clone();
        FormSession::new(schema)
    }

    /// Resolve a saved schema by position, name, or latest, and open a fill
    /// session over it. `None` when nothing matches.
    pub fn preview(&mut self, selector: Option<&str>) -> Option<FormSession> {
        let schema = self.repository.resolve(selector)?;
        Some(self.load_for_preview(schema))
    }
}
