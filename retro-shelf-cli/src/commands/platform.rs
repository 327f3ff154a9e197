use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use retro_shelf_catalog::Category;

use crate::CliError;

pub(crate) fn run_platform_list(conn: &Connection) -> Result<(), CliError> {
    let platforms = retro_shelf_db::registry::list(conn)?;
    if platforms.is_empty() {
        log::info!(
            "{}",
            "No platforms registered.".if_supports_color(Stdout, |t| t.dimmed()),
        );
        return Ok(());
    }

    let mut items = Vec::new();
    for category in Category::ITEMS {
        items.extend(retro_shelf_db::store::get_items(conn, category)?);
    }

    log::info!(
        "{}",
        "Platforms".if_supports_color(Stdout, |t| t.bold()),
    );
    for platform in &platforms {
        let in_use = items.iter().filter(|i| i.platform == platform.name).count();
        let logo = if platform.logo.is_some() { "logo" } else { "" };
        log::info!(
            "  {:<24} {:>4} item(s) {:>5} {}",
            platform.name.if_supports_color(Stdout, |t| t.cyan()),
            in_use,
            logo,
            platform
                .id
                .as_deref()
                .unwrap_or("-")
                .if_supports_color(Stdout, |t| t.dimmed()),
        );
    }
    Ok(())
}

pub(crate) fn run_platform_add(
    conn: &Connection,
    name: &str,
    logo: Option<String>,
) -> Result<(), CliError> {
    match retro_shelf_db::registry::add(conn, name, logo)? {
        Some(platform) => {
            log::info!(
                "{} Added platform '{}' ({})",
                "\u{2714}".if_supports_color(Stdout, |t| t.green()),
                platform.name.if_supports_color(Stdout, |t| t.bold()),
                platform.id.as_deref().unwrap_or("-"),
            );
        }
        None => {
            log::warn!(
                "{} A platform named '{}' already exists",
                "\u{26A0}".if_supports_color(Stdout, |t| t.yellow()),
                name.trim(),
            );
        }
    }
    Ok(())
}

pub(crate) fn run_platform_rename(conn: &Connection, id: &str, name: &str) -> Result<(), CliError> {
    let mut platform = retro_shelf_db::registry::find(conn, id)?
        .ok_or_else(|| CliError::other(format!("no platform with id {id}")))?;

    let old_name = platform.name.clone();
    platform.name = name.trim().to_string();
    let stored = retro_shelf_db::registry::update(conn, &platform)?;

    log::info!(
        "{} Renamed '{}' to '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        old_name,
        stored.name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

pub(crate) fn run_platform_rm(conn: &Connection, id: &str) -> Result<(), CliError> {
    let platform = retro_shelf_db::registry::find(conn, id)?
        .ok_or_else(|| CliError::other(format!("no platform with id {id}")))?;

    retro_shelf_db::registry::delete(conn, id)?;
    log::info!(
        "{} Removed platform '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        platform.name.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}
