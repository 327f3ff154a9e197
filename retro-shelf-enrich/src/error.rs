/// Errors from best-effort enrichment lookups.
///
/// Callers treat every variant as non-fatal: a failed cover or metadata
/// fetch never aborts the save that requested it.
#[derive(Debug, thiserror::Error)]
pub enum EnrichError {
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("could not load a cover from {url}: every fetch strategy failed; the origin site may block access")]
    CoverUnavailable { url: String },

    #[error("unexpected API response: {0}")]
    Api(String),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
}
