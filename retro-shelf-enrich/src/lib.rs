//! Best-effort enrichment for collection items.
//!
//! Two independent helpers: cover art fetching through a proxy fallback
//! chain, and Wikipedia-based metadata lookup with heuristic candidate
//! scoring. Both are strictly optional; failures here never abort a save.

pub mod client;
pub mod cover;
pub mod error;
pub mod metadata;

pub use client::EnrichClient;
pub use error::EnrichError;
pub use metadata::{GameMetadata, SearchHit, pick_best, score_candidate};
