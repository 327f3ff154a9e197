//! Snapshot assembly, full-replace import, and local file round-trips.

use std::path::Path;

use retro_shelf_catalog::{Category, Snapshot};
use rusqlite::Connection;

use crate::error::SyncError;

/// Counts from applying a snapshot.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub games: usize,
    pub consoles: usize,
    pub platforms: usize,
}

impl ImportStats {
    pub fn total(&self) -> usize {
        self.games + self.consoles + self.platforms
    }
}

/// Assemble a snapshot from the full local state.
pub fn export_snapshot(conn: &Connection) -> Result<Snapshot, SyncError> {
    let games = retro_shelf_db::store::get_items(conn, Category::Games)?;
    let consoles = retro_shelf_db::store::get_items(conn, Category::Consoles)?;
    let platforms = retro_shelf_db::registry::list(conn)
        .map_err(|e| SyncError::Config(e.to_string()))?;
    Ok(Snapshot::new(games, consoles, platforms))
}

/// Replace all local state with the snapshot's contents.
///
/// Destructive by design: the three categories are cleared first, then
/// every record is inserted sequentially. There is no merge and no
/// rollback; a failure partway leaves whatever had been written.
pub fn apply_snapshot(conn: &Connection, snapshot: &Snapshot) -> Result<ImportStats, SyncError> {
    retro_shelf_db::store::clear(conn, Category::Games)?;
    retro_shelf_db::store::clear(conn, Category::Consoles)?;
    retro_shelf_db::store::clear(conn, Category::Platforms)?;

    let mut stats = ImportStats::default();

    for game in &snapshot.games {
        retro_shelf_db::store::put_item(conn, Category::Games, game)?;
        stats.games += 1;
    }
    for console in &snapshot.consoles {
        retro_shelf_db::store::put_item(conn, Category::Consoles, console)?;
        stats.consoles += 1;
    }
    for platform in &snapshot.platforms {
        retro_shelf_db::store::put(
            conn,
            Category::Platforms,
            serde_json::to_value(platform).map_err(retro_shelf_db::StoreError::from)?,
        )?;
        stats.platforms += 1;
    }

    log::info!(
        "applied snapshot: {} games, {} consoles, {} platforms",
        stats.games,
        stats.consoles,
        stats.platforms
    );
    Ok(stats)
}

/// Write a snapshot to a local JSON file, pretty-printed.
pub fn write_snapshot_file(path: &Path, snapshot: &Snapshot) -> Result<(), SyncError> {
    let json = serde_json::to_string_pretty(snapshot)
        .map_err(|e| SyncError::Config(format!("failed to serialize snapshot: {e}")))?;
    std::fs::write(path, json)?;
    Ok(())
}

/// Read a snapshot from a local JSON file.
///
/// Files that picked up trailing junk (partial writes, copy-paste
/// accidents) get one recovery attempt: truncate at the last closing
/// brace and re-parse.
pub fn read_snapshot_file(path: &Path) -> Result<Snapshot, SyncError> {
    let text = std::fs::read_to_string(path)?;
    parse_snapshot_text(&text)
}

pub fn parse_snapshot_text(text: &str) -> Result<Snapshot, SyncError> {
    let trimmed = text.trim();
    match serde_json::from_str(trimmed) {
        Ok(snapshot) => Ok(snapshot),
        Err(first_err) => {
            if let Some(last_brace) = trimmed.rfind('}') {
                if let Ok(snapshot) = serde_json::from_str(&trimmed[..=last_brace]) {
                    log::warn!("snapshot had trailing junk; recovered by truncating");
                    return Ok(snapshot);
                }
            }
            Err(SyncError::CorruptFile(first_err.to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recovers_from_trailing_junk() {
        let text = "{\"games\":[{\"title\":\"Rez\"}]}\ngarbage after";
        let snap = parse_snapshot_text(text).unwrap();
        assert_eq!(snap.games.len(), 1);
    }

    #[test]
    fn unrecoverable_text_is_corrupt() {
        assert!(matches!(
            parse_snapshot_text("not json at all"),
            Err(SyncError::CorruptFile(_))
        ));
    }
}
