use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;
use tokio::runtime::Runtime;

use retro_shelf_enrich::EnrichClient;

use crate::CliError;

use super::network_spinner;

/// List candidate cover URLs for an item's title.
///
/// Discovery only: nothing is written. The printed URLs are meant to be
/// fed back through `enrich --cover-url`.
pub(crate) fn run_find_covers(conn: &Connection, rt: &Runtime, id: &str) -> Result<(), CliError> {
    let (_, item) = retro_shelf_db::store::find_item(conn, id)?
        .ok_or_else(|| CliError::other(format!("no item with id {id}")))?;

    let client =
        EnrichClient::new().map_err(|e| CliError::runtime(format!("HTTP client setup: {e}")))?;

    let spinner = network_spinner(format!("Searching covers for '{}'...", item.title));
    let result = rt.block_on(client.search_covers(&item.title));
    spinner.finish_and_clear();

    let candidates = match result {
        Ok(candidates) => candidates,
        Err(e) => {
            log::warn!(
                "{} Cover search failed: {e}",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
            );
            return Ok(());
        }
    };

    if candidates.is_empty() {
        log::info!("No cover candidates found for '{}'", item.title);
        return Ok(());
    }

    log::info!(
        "Cover candidates for '{}':",
        item.title.if_supports_color(Stdout, |t| t.bold()),
    );
    for (n, url) in candidates.iter().enumerate() {
        log::info!(
            "  {} {url}",
            format!("{}.", n + 1).if_supports_color(Stdout, |t| t.cyan()),
        );
    }
    crate::log_blank();
    log::info!("Embed one with: retro-shelf enrich {id} --cover-url <URL> --no-metadata");
    Ok(())
}

/// Enrich one item with cover art and/or metadata.
///
/// Every network failure here is reported and swallowed; enrichment never
/// aborts, and whatever succeeded is saved.
pub(crate) fn run_enrich(
    conn: &Connection,
    rt: &Runtime,
    id: &str,
    cover_url: Option<String>,
    no_metadata: bool,
) -> Result<(), CliError> {
    let (category, mut item) = retro_shelf_db::store::find_item(conn, id)?
        .ok_or_else(|| CliError::other(format!("no item with id {id}")))?;

    let client =
        EnrichClient::new().map_err(|e| CliError::runtime(format!("HTTP client setup: {e}")))?;
    let mut changed = false;

    if let Some(url) = cover_url {
        let spinner = network_spinner(format!("Fetching cover for '{}'...", item.title));
        let result = rt.block_on(client.fetch_cover(&url));
        spinner.finish_and_clear();

        match result {
            Ok(data_uri) => {
                item.image = Some(data_uri);
                changed = true;
                log::info!(
                    "{} Cover embedded",
                    "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                );
            }
            Err(e) => {
                log::warn!(
                    "{} Cover fetch failed: {e}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
    }

    if !no_metadata {
        let spinner = network_spinner(format!("Looking up metadata for '{}'...", item.title));
        let result = rt.block_on(client.fetch_metadata(&item.title));
        spinner.finish_and_clear();

        match result {
            Ok(Some(meta)) => {
                // Suggestions fill gaps only; fields the user already set win.
                if item.year.is_none() && meta.year.is_some() {
                    item.year = meta.year;
                    changed = true;
                }
                if item.genre.is_none() && meta.genre.is_some() {
                    item.genre = meta.genre;
                    changed = true;
                }
                if item.developer.is_none() && meta.developer.is_some() {
                    item.developer = meta.developer;
                    changed = true;
                }
                if item.notes.is_none() && meta.description.is_some() {
                    item.notes = meta.description;
                    changed = true;
                }
                if changed {
                    log::info!(
                        "{} Metadata found (approximate; review with 'edit')",
                        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                    );
                } else {
                    log::info!("All metadata fields were already set");
                }
            }
            Ok(None) => {
                log::info!("No metadata found for '{}'", item.title);
            }
            Err(e) => {
                log::warn!(
                    "{} Metadata lookup failed: {e}",
                    "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                );
            }
        }
    }

    if changed {
        retro_shelf_db::store::put_item(conn, category, &item)?;
        log::info!(
            "{} Updated '{}'",
            "\u{2714}".if_supports_color(Stdout, |t| t.green()),
            item.title.if_supports_color(Stdout, |t| t.bold()),
        );
    } else {
        log::info!("Nothing to update.");
    }
    Ok(())
}
