//! Data model for the retro-shelf collection tracker.
//!
//! Items (games, consoles), platforms, and the snapshot payload used by
//! export/import and cloud sync, plus field validation helpers.

pub mod dates;
pub mod types;

pub use dates::{DateError, validate_acquired_date};
pub use types::{Category, Item, Platform, Snapshot, SNAPSHOT_VERSION, new_record_id};
