//! Bulk text import.
//!
//! Parses pasted or file-loaded lists where each line is
//! `Platform;Title` (semicolon, tab, or comma separated), auto-creates
//! any platform the registry doesn't know yet, and inserts the items one
//! by one. Writes are sequential single-record puts with no rollback: a
//! failure partway leaves the rows already written.

use retro_shelf_catalog::{Category, Item};
use rusqlite::Connection;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ImportError {
    #[error("store error: {0}")]
    Store(#[from] retro_shelf_db::StoreError),
    #[error("registry error: {0}")]
    Registry(#[from] retro_shelf_db::RegistryError),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BulkEntry {
    pub line: usize,
    pub platform: String,
    pub title: String,
}

/// Result of parsing bulk text: usable entries plus per-line skip reasons.
#[derive(Debug, Default)]
pub struct ParseReport {
    pub entries: Vec<BulkEntry>,
    pub skipped: Vec<(usize, String)>,
}

/// Counts from applying a parsed bulk list.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct BulkStats {
    pub items_created: usize,
    pub duplicates_skipped: usize,
    pub platforms_created: usize,
}

/// Parse bulk text into entries.
///
/// The delimiter is detected from the text (most frequent of `;`, tab,
/// `,`; semicolon wins ties since that is the documented format). Blank
/// lines are ignored; lines without both fields are reported as skipped.
pub fn parse_bulk_text(text: &str) -> Result<ParseReport, ImportError> {
    let delimiter = detect_delimiter(text);
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let mut report = ParseReport::default();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        // Physical line number from the reader; the record index drifts
        // once the reader has skipped blank lines
        let line = record
            .position()
            .map(|p| p.line() as usize)
            .unwrap_or(index + 1);

        let platform = record.get(0).unwrap_or_default();
        let title = record.get(1).unwrap_or_default();

        if platform.is_empty() && title.is_empty() {
            continue;
        }
        if platform.is_empty() || title.is_empty() {
            report
                .skipped
                .push((line, "expected 'Platform;Title'".to_string()));
            continue;
        }

        report.entries.push(BulkEntry {
            line,
            platform: platform.to_string(),
            title: title.to_string(),
        });
    }

    Ok(report)
}

/// Insert parsed entries into a category.
///
/// Each entry's platform is auto-vivified in the registry first, so
/// free-text platform strings become registry entries. An entry whose
/// title already exists on the same platform (case-insensitive) is
/// counted as a duplicate and skipped.
pub fn apply_bulk(
    conn: &Connection,
    category: Category,
    entries: &[BulkEntry],
) -> Result<BulkStats, ImportError> {
    let mut stats = BulkStats::default();

    let existing = retro_shelf_db::store::get_items(conn, category)?;
    let mut seen: Vec<(String, String)> = existing
        .iter()
        .map(|i| (i.platform.to_lowercase(), i.title.to_lowercase()))
        .collect();

    for entry in entries {
        if retro_shelf_db::registry::ensure_exists(conn, &entry.platform)?.is_some() {
            stats.platforms_created += 1;
        }

        let key = (entry.platform.to_lowercase(), entry.title.to_lowercase());
        if seen.contains(&key) {
            log::debug!("skipping duplicate: {} / {}", entry.platform, entry.title);
            stats.duplicates_skipped += 1;
            continue;
        }

        retro_shelf_db::store::put_item(
            conn,
            category,
            &Item::new(entry.title.clone(), entry.platform.clone()),
        )?;
        seen.push(key);
        stats.items_created += 1;
    }

    log::info!(
        "bulk import: {} created, {} duplicates, {} new platforms",
        stats.items_created,
        stats.duplicates_skipped,
        stats.platforms_created
    );
    Ok(stats)
}

fn detect_delimiter(text: &str) -> u8 {
    let semicolons = text.matches(';').count();
    let tabs = text.matches('\t').count();
    let commas = text.matches(',').count();

    if tabs > semicolons && tabs > commas {
        b'\t'
    } else if commas > semicolons && commas > tabs {
        b','
    } else {
        b';'
    }
}
