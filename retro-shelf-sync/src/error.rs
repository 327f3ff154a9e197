/// Errors that can occur during cloud sync and snapshot handling.
#[derive(Debug, thiserror::Error)]
pub enum SyncError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("cloud host answered HTTP {status}: {message}")]
    Status { status: u16, message: String },

    #[error("empty response from {url}")]
    EmptyBody { url: String },

    #[error("{url} returned an HTML page instead of JSON; the host may be down, try again later")]
    HtmlBody { url: String },

    #[error("JSON syntax error: {message}. Content starts with: \"{preview}\"")]
    Json { message: String, preview: String },

    #[error("snapshot file is corrupted: {0}")]
    CorruptFile(String),

    #[error("store error: {0}")]
    Store(#[from] retro_shelf_db::StoreError),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}
