use thiserror::Error;

/// Errors that can occur during CLI command execution.
#[derive(Debug, Error)]
pub(crate) enum CliError {
    /// I/O error
    #[error("{0}")]
    Io(#[from] std::io::Error),

    /// Local store failure
    #[error("Store error: {0}")]
    Store(#[from] retro_shelf_db::StoreError),

    /// Platform registry failure
    #[error("{0}")]
    Registry(#[from] retro_shelf_db::RegistryError),

    /// Cloud sync failure
    #[error("Sync error: {0}")]
    Sync(#[from] retro_shelf_sync::SyncError),

    /// Bulk import failure
    #[error("Import error: {0}")]
    Import(#[from] retro_shelf_import::ImportError),

    /// Rejected acquired date
    #[error("Invalid date: {0}")]
    InvalidDate(#[from] retro_shelf_catalog::DateError),

    /// Database open or query failed
    #[error("Database error: {0}")]
    Database(String),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),

    /// Runtime creation or async error
    #[error("Runtime error: {0}")]
    Runtime(String),

    /// Catch-all for other errors
    #[error("{0}")]
    Other(String),
}

impl CliError {
    pub(crate) fn database(msg: impl Into<String>) -> Self {
        Self::Database(msg.into())
    }

    pub(crate) fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub(crate) fn runtime(msg: impl Into<String>) -> Self {
        Self::Runtime(msg.into())
    }

    pub(crate) fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }
}
