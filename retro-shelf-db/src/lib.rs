//! SQLite persistence layer for the collection tracker.
//!
//! Provides schema creation, the schemaless per-category record store,
//! and the platform registry, backed by SQLite (via rusqlite with the
//! bundled feature).

pub mod registry;
pub mod schema;
pub mod store;

pub use registry::RegistryError;
pub use schema::{SchemaError, open_database, open_memory};
pub use store::StoreError;
