//! Saved-schema repository.
//!
//! The whole ordered collection of saved schemas is serialized as one JSON
//! array under a single key of an injected [`BlobStore`]. Every write
//! replaces the previous content; the last writer wins. Reads never fail:
//! missing, corrupt, or wrongly-shaped content degrades to an empty
//! collection with a logged warning.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use formwork_model::FormSchema;

use crate::error::{PersistenceError, Result};
use crate::store::BlobStore;

/// Key the form collection lives under by default.
pub const DEFAULT_COLLECTION_KEY: &str = "forms";

/// Listing metadata for one saved schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaSummary {
    pub name: String,
    pub created_at: Option<DateTime<Utc>>,
    pub field_count: usize,
}

/// Repository over the ordered list of saved form schemas.
#[derive(Debug, Clone)]
pub struct SchemaRepository<S> {
    store: S,
    key: String,
}

impl<S: BlobStore> SchemaRepository<S> {
    /// Repository over `store` using [`DEFAULT_COLLECTION_KEY`].
    pub fn new(store: S) -> Self {
        Self {
            store,
            key: DEFAULT_COLLECTION_KEY.to_string(),
        }
    }

    /// Use a different collection key.
    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    /// Borrow the underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Load the full collection, oldest first.
    ///
    /// Content that is missing, fails to parse, or is not an array of
    /// schemas yields an empty collection. The session goes on with no
    /// saved forms rather than refusing to start.
    pub fn load_all(&self) -> Vec<FormSchema> {
        let Some(raw) = self.store.get(&self.key) else {
            warn!(key = %self.key, "no stored form collection, starting empty");
            return Vec::new();
        };
        match serde_json::from_str::<Vec<FormSchema>>(&raw) {
            Ok(schemas) => schemas,
            Err(error) => {
                warn!(
                    key = %self.key,
                    %error,
                    "stored form collection is unreadable, starting empty"
                );
                Vec::new()
            }
        }
    }

    /// Replace the entire persisted collection.
    pub fn save_all(&mut self, schemas: &[FormSchema]) -> Result<()> {
        let payload = serde_json::to_string_pretty(schemas)
            .map_err(|e| PersistenceError::Serialization { source: e })?;
        self.store.set(&self.key, payload)?;
        info!(key = %self.key, count = schemas.len(), "saved form collection");
        Ok(())
    }

    /// Append one schema to the persisted collection and return the updated
    /// list.
    pub fn append(&mut self, schema: FormSchema) -> Result<Vec<FormSchema>> {
        let mut schemas = self.load_all();
        schemas.push(schema);
        self.save_all(&schemas)?;
        Ok(schemas)
    }

    /// Look up one saved schema.
    ///
    /// A selector that parses as an in-range integer picks by position;
    /// anything else matches the first schema with that exact name. With no
    /// selector the most recently appended schema wins. `None` when nothing
    /// matches or nothing is saved.
    pub fn resolve(&self, selector: Option<&str>) -> Option<FormSchema> {
        let schemas = self.load_all();
        match selector {
            Some(selector) => {
                if let Ok(index) = selector.parse::<usize>()
                    && index < schemas.len()
                {
                    return schemas.into_iter().nth(index);
                }
                // Out-of-range or non-numeric selectors fall through to a
                // name match.
                schemas.into_iter().find(|schema| schema.name == selector)
            }
            None => schemas.into_iter().next_back(),
        }
    }

    /// Listing metadata for every saved schema, in stored order.
    pub fn list(&self) -> Vec<SchemaSummary> {
        self.load_all()
            .into_iter()
            .map(|schema| SchemaSummary {
                name: schema.name,
                created_at: schema.created_at,
                field_count: schema.fields.len(),
            })
            .collect()
    }
}
