//! retro-shelf CLI
//!
//! Command-line interface for tracking a retro game and console collection.

mod cli_types;
mod commands;
mod error;

use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use cli_types::{Cli, Commands, ImportAction, PlatformAction, SyncAction};
use error::CliError;

/// How long the store open may take before startup is declared failed.
const OPEN_TIMEOUT: Duration = Duration::from_secs(5);

fn main() {
    let cli = Cli::parse();
    init_logging(cli.quiet, cli.verbose);

    if let Err(e) = run(cli) {
        log::error!(
            "{} {e}",
            "\u{2718}".if_supports_color(Stdout, |t| t.red()),
        );
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CliError> {
    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::runtime(format!("failed to create async runtime: {e}")))?;
    let db = cli.db;

    match cli.command {
        Commands::Stats => commands::stats::run_stats(&open_store(&rt, db)?),
        Commands::List {
            category,
            platform,
            wishlist,
            title,
        } => commands::list::run_list(&open_store(&rt, db)?, category, platform, wishlist, title),
        Commands::Add {
            category,
            title,
            platform,
            price,
            acquired,
            year,
            genre,
            developer,
            notes,
            wishlist,
        } => commands::item::run_add(
            &open_store(&rt, db)?,
            category,
            commands::item::NewItem {
                title,
                platform,
                price,
                acquired,
                year,
                genre,
                developer,
                notes,
                wishlist,
            },
        ),
        Commands::Edit {
            id,
            title,
            platform,
            price,
            acquired,
            year,
            genre,
            developer,
            notes,
            wishlist,
            move_to,
        } => commands::item::run_edit(
            &open_store(&rt, db)?,
            &id,
            commands::item::ItemChanges {
                title,
                platform,
                price,
                acquired,
                year,
                genre,
                developer,
                notes,
                wishlist,
                move_to,
            },
        ),
        Commands::Rm { id } => commands::item::run_rm(&open_store(&rt, db)?, &id),
        Commands::Check { id } => commands::item::run_check(&open_store(&rt, db)?, &id),
        Commands::Platform { action } => {
            let conn = open_store(&rt, db)?;
            match action {
                PlatformAction::List => commands::platform::run_platform_list(&conn),
                PlatformAction::Add { name, logo } => {
                    commands::platform::run_platform_add(&conn, &name, logo)
                }
                PlatformAction::Rename { id, name } => {
                    commands::platform::run_platform_rename(&conn, &id, &name)
                }
                PlatformAction::Rm { id } => commands::platform::run_platform_rm(&conn, &id),
            }
        }
        Commands::Enrich {
            id,
            cover_url,
            find_covers,
            no_metadata,
        } => {
            let conn = open_store(&rt, db)?;
            if find_covers {
                commands::enrich::run_find_covers(&conn, &rt, &id)
            } else {
                commands::enrich::run_enrich(&conn, &rt, &id, cover_url, no_metadata)
            }
        }
        Commands::Import { action } => {
            let conn = open_store(&rt, db)?;
            match action {
                ImportAction::Bulk { file, category } => {
                    commands::import::run_import_bulk(&conn, category, file)
                }
                ImportAction::File { path, force } => {
                    commands::import::run_import_file(&conn, &path, force)
                }
            }
        }
        Commands::Export { file } => commands::import::run_export_file(&open_store(&rt, db)?, &file),
        Commands::Sync { action } => match action {
            SyncAction::Pull { force } => {
                commands::sync::run_sync_pull(&open_store(&rt, db)?, &rt, force)
            }
            SyncAction::Push => commands::sync::run_sync_push(&open_store(&rt, db)?, &rt),
            SyncAction::Status => commands::sync::run_sync_status(),
            SyncAction::Config { url, token } => commands::sync::run_sync_config(url, token),
        },
        Commands::Nuke { force } => commands::nuke::run_nuke(&open_store(&rt, db)?, force),
    }
}

/// Open the collection database, racing against [`OPEN_TIMEOUT`].
///
/// SQLite opens can hang indefinitely on a wedged network mount; a store
/// that isn't ready within the window is treated as a fatal startup error
/// rather than left spinning.
fn open_store(rt: &tokio::runtime::Runtime, db: Option<PathBuf>) -> Result<Connection, CliError> {
    let path = match db {
        Some(path) => path,
        None => default_db_path()?,
    };
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    log::debug!("opening store at {}", path.display());
    let opened = rt.block_on(async {
        tokio::time::timeout(
            OPEN_TIMEOUT,
            tokio::task::spawn_blocking(move || retro_shelf_db::open_database(&path)),
        )
        .await
    });

    match opened {
        Err(_) => Err(CliError::database(format!(
            "the store did not open within {} seconds",
            OPEN_TIMEOUT.as_secs(),
        ))),
        Ok(Err(e)) => Err(CliError::runtime(format!("store open task failed: {e}"))),
        Ok(Ok(Err(e))) => Err(CliError::database(format!("failed to open the store: {e}"))),
        Ok(Ok(Ok(conn))) => Ok(conn),
    }
}

/// Default database location under the platform data directory.
fn default_db_path() -> Result<PathBuf, CliError> {
    dirs::data_dir()
        .map(|d| d.join("retro-shelf").join("shelf.db"))
        .ok_or_else(|| CliError::config("could not determine the user data directory"))
}

/// Route `log` output to the terminal.
///
/// Info-level messages double as normal program output, so the default
/// format is the bare message. Verbose mode switches to the full
/// timestamped format for debugging.
fn init_logging(quiet: bool, verbose: bool) {
    let level = if verbose {
        log::LevelFilter::Debug
    } else if quiet {
        log::LevelFilter::Warn
    } else {
        log::LevelFilter::Info
    };

    let mut builder = env_logger::Builder::new();
    builder.filter_level(level);
    if !verbose {
        builder.format(|buf, record| {
            use std::io::Write;
            writeln!(buf, "{}", record.args())
        });
    }
    builder.parse_default_env();
    builder.init();
}

/// Print a blank line at info level.
pub(crate) fn log_blank() {
    log::info!("");
}
