//! Persistent storage for saved form schemas.
//!
//! Schemas persist as one JSON array under a single key of a pluggable
//! [`BlobStore`]. The bundled stores are [`MemoryStore`] (tests, embedded
//! use) and [`FileStore`] (one file per key, atomic temp-file + rename
//! writes).
//!
//! Two properties shape the API:
//!
//! - **Writes replace.** The collection is saved whole; concurrent writers
//!   are resolved by last-write-wins, not by merging.
//! - **Reads degrade.** Missing or corrupt content loads as an empty
//!   collection with a logged warning. A broken store never blocks a new
//!   session.

mod error;
mod repository;
mod store;

pub use error::{PersistenceError, Result};
pub use repository::{DEFAULT_COLLECTION_KEY, SchemaRepository, SchemaSummary};
pub use store::{BlobStore, FileStore, MemoryStore};
