//! Cloud sync for the collection tracker.
//!
//! Normalizes pasted share links, pulls and pushes the full-database
//! snapshot (a gist or any raw JSON URL), and persists the user's sync
//! settings. Import is a full replace; see [`snapshot::apply_snapshot`].

pub mod error;
pub mod link;
pub mod remote;
pub mod settings;
pub mod snapshot;

pub use error::SyncError;
pub use link::{gist_id_from_url, is_github_host, to_direct_link};
pub use remote::SyncClient;
pub use settings::{SyncSettings, TOKEN_ENV_VAR, config_path};
pub use snapshot::{
    ImportStats, apply_snapshot, export_snapshot, read_snapshot_file, write_snapshot_file,
};
