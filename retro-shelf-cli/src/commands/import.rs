use std::path::Path;

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use retro_shelf_catalog::Category;
use retro_shelf_import::{apply_bulk, parse_bulk_text};
use retro_shelf_sync::{apply_snapshot, export_snapshot, read_snapshot_file, write_snapshot_file};

use crate::CliError;

use super::confirm;

pub(crate) fn run_import_bulk(
    conn: &Connection,
    category: Category,
    file: Option<std::path::PathBuf>,
) -> Result<(), CliError> {
    if !Category::ITEMS.contains(&category) {
        return Err(CliError::other(format!("'{category}' does not hold items")));
    }

    let text = match file {
        Some(path) => std::fs::read_to_string(path)?,
        None => std::io::read_to_string(std::io::stdin())?,
    };

    let report = parse_bulk_text(&text)?;
    for (line, reason) in &report.skipped {
        log::warn!(
            "{} line {line}: {reason}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    if report.entries.is_empty() {
        log::info!("Nothing to import.");
        return Ok(());
    }

    let stats = apply_bulk(conn, category, &report.entries)?;
    log::info!(
        "{} Imported {} item(s) into {} ({} duplicate(s) skipped, {} platform(s) created)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.items_created,
        category,
        stats.duplicates_skipped,
        stats.platforms_created,
    );
    Ok(())
}

pub(crate) fn run_import_file(conn: &Connection, path: &Path, force: bool) -> Result<(), CliError> {
    let snapshot = read_snapshot_file(path)?;
    log::info!(
        "Snapshot from {}: {} game(s), {} console(s), {} platform(s)",
        if snapshot.timestamp.is_empty() {
            "unknown time"
        } else {
            snapshot.timestamp.as_str()
        },
        snapshot.games.len(),
        snapshot.consoles.len(),
        snapshot.platforms.len(),
    );

    if !force && !confirm("Replace the entire local collection with this snapshot?")? {
        log::info!("Cancelled.");
        return Ok(());
    }

    let stats = apply_snapshot(conn, &snapshot)?;
    log::info!(
        "{} Imported {} record(s)",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.total(),
    );
    Ok(())
}

pub(crate) fn run_export_file(conn: &Connection, path: &Path) -> Result<(), CliError> {
    let snapshot = export_snapshot(conn)?;
    write_snapshot_file(path, &snapshot)?;
    log::info!(
        "{} Exported {} record(s) to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        snapshot.record_count(),
        path.display(),
    );
    Ok(())
}
