use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use retro_shelf_catalog::Category;

use crate::CliError;

/// Wipe every category. Without `--force` this only previews the damage.
pub(crate) fn run_nuke(conn: &Connection, force: bool) -> Result<(), CliError> {
    let mut total = 0usize;
    for category in Category::ALL {
        total += retro_shelf_db::store::count(conn, category)?;
    }

    if !force {
        log::warn!(
            "{} This would delete {total} record(s) across every category.",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
        log::info!("Re-run with --force to proceed.");
        return Ok(());
    }

    for category in Category::ALL {
        retro_shelf_db::store::clear(conn, category)?;
    }

    log::info!(
        "{} Deleted {total} record(s). The shelf is empty.",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
    );
    Ok(())
}
