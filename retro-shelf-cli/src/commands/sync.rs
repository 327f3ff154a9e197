use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;
use tokio::runtime::Runtime;

use retro_shelf_sync::{
    SyncClient, SyncSettings, apply_snapshot, config_path, export_snapshot, gist_id_from_url,
    to_direct_link,
};

use crate::CliError;

use super::{confirm, network_spinner};

/// Gist file the collection snapshot is stored under.
const SNAPSHOT_FILENAME: &str = "retro-shelf.json";

pub(crate) fn run_sync_pull(conn: &Connection, rt: &Runtime, force: bool) -> Result<(), CliError> {
    let mut settings = SyncSettings::load();
    let url = settings.cloud_sync_url.clone().ok_or_else(|| {
        CliError::config("no sync link configured; run 'retro-shelf sync config --url <link>'")
    })?;

    let client = SyncClient::new()?;
    let spinner = network_spinner("Pulling cloud snapshot...");
    let result = rt.block_on(client.pull(&url));
    spinner.finish_and_clear();
    let snapshot = result?;

    log::info!(
        "Remote snapshot from {}: {} game(s), {} console(s), {} platform(s)",
        if snapshot.timestamp.is_empty() {
            "unknown time"
        } else {
            snapshot.timestamp.as_str()
        },
        snapshot.games.len(),
        snapshot.consoles.len(),
        snapshot.platforms.len(),
    );

    if !force && !confirm("Replace the entire local collection with the remote snapshot?")? {
        log::info!("Cancelled.");
        return Ok(());
    }

    let stats = apply_snapshot(conn, &snapshot)?;
    if let Err(e) = settings.record_sync_success() {
        log::warn!("could not persist sync status: {e}");
    }

    log::info!(
        "{} Synced {} record(s) from the cloud",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stats.total(),
    );
    Ok(())
}

pub(crate) fn run_sync_push(conn: &Connection, rt: &Runtime) -> Result<(), CliError> {
    let mut settings = SyncSettings::load();
    let url = settings.cloud_sync_url.clone().ok_or_else(|| {
        CliError::config("no sync link configured; run 'retro-shelf sync config --url <link>'")
    })?;
    let token = settings.github_token.clone().ok_or_else(|| {
        CliError::config(
            "no GitHub token configured; run 'retro-shelf sync config --token <token>' \
             or set RETRO_SHELF_GITHUB_TOKEN",
        )
    })?;
    let gist_id = gist_id_from_url(&url)
        .ok_or_else(|| CliError::config("the sync link does not look like a gist URL"))?;

    let snapshot = export_snapshot(conn)?;
    let client = SyncClient::new()?;
    let spinner = network_spinner("Pushing snapshot to the gist...");
    let result = rt.block_on(client.push(&token, &gist_id, SNAPSHOT_FILENAME, &snapshot));
    spinner.finish_and_clear();

    match result {
        Ok(()) => {
            if let Err(e) = settings.record_sync_success() {
                log::warn!("could not persist sync status: {e}");
            }
            log::info!(
                "{} Pushed {} record(s) to gist {gist_id}",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                snapshot.record_count(),
            );
            Ok(())
        }
        Err(e) => {
            // Remembered so the stats screen can surface the failure later.
            settings.record_push_error(&e.to_string());
            Err(e.into())
        }
    }
}

pub(crate) fn run_sync_status() -> Result<(), CliError> {
    let settings = SyncSettings::load();

    log::info!(
        "{}",
        "Sync status".if_supports_color(Stdout, |t| t.bold()),
    );
    if let Some(path) = config_path() {
        log::info!("  Config:    {}", path.display());
    }

    match &settings.cloud_sync_url {
        Some(url) => {
            log::info!("  Link:      {url}");
            let direct = to_direct_link(url);
            if direct != *url {
                log::info!(
                    "  Fetches:   {}",
                    direct.if_supports_color(Stdout, |t| t.dimmed()),
                );
            }
        }
        None => log::info!(
            "  Link:      {}",
            "not configured".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }

    log::info!(
        "  Token:     {}",
        if settings.github_token.is_some() {
            "configured"
        } else {
            "not set"
        },
    );
    match &settings.last_sync_timestamp {
        Some(ts) => log::info!("  Last sync: {ts}"),
        None => log::info!(
            "  Last sync: {}",
            "never".if_supports_color(Stdout, |t| t.dimmed()),
        ),
    }
    if let Some(err) = &settings.last_push_error {
        log::warn!(
            "  {} Last push failed: {err}",
            "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
        );
    }
    Ok(())
}

pub(crate) fn run_sync_config(
    url: Option<String>,
    token: Option<String>,
) -> Result<(), CliError> {
    if url.is_none() && token.is_none() {
        return run_sync_status();
    }

    let mut settings = SyncSettings::load();
    if let Some(url) = url {
        settings.cloud_sync_url = Some(url);
    }
    if let Some(token) = token {
        settings.github_token = Some(token);
    }

    let path = settings.save()?;
    log::info!(
        "{} Settings saved to {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        path.display(),
    );
    Ok(())
}
