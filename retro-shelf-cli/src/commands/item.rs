use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;
use rusqlite::Connection;

use retro_shelf_catalog::{Category, Item, validate_acquired_date};

use crate::CliError;

/// Fields for a new item.
pub(crate) struct NewItem {
    pub title: String,
    pub platform: String,
    pub price: f64,
    pub acquired: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub developer: Option<String>,
    pub notes: Option<String>,
    pub wishlist: bool,
}

/// Field updates for an existing item. `None` leaves a field untouched.
pub(crate) struct ItemChanges {
    pub title: Option<String>,
    pub platform: Option<String>,
    pub price: Option<f64>,
    pub acquired: Option<String>,
    pub year: Option<i32>,
    pub genre: Option<String>,
    pub developer: Option<String>,
    pub notes: Option<String>,
    pub wishlist: Option<bool>,
    pub move_to: Option<Category>,
}

pub(crate) fn run_add(conn: &Connection, category: Category, new: NewItem) -> Result<(), CliError> {
    require_item_category(category)?;
    if new.price < 0.0 {
        return Err(CliError::other("price must be non-negative"));
    }
    if let Some(date) = &new.acquired {
        validate_acquired_date(date)?;
    }

    // Free-text platform strings become registry entries so the platform
    // manager sees everything items reference.
    if let Some(created) = retro_shelf_db::registry::ensure_exists(conn, &new.platform)? {
        log::info!("Registered new platform '{}'", created.name);
    }

    let mut item = Item::new(new.title, new.platform);
    item.price = new.price;
    item.acquired_date = new.acquired;
    item.year = new.year;
    item.genre = new.genre;
    item.developer = new.developer;
    item.notes = new.notes;
    item.is_wishlist = new.wishlist;

    let stored = retro_shelf_db::store::put_item(conn, category, &item)?;
    log::info!(
        "{} Added '{}' to {} ({})",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stored.title.if_supports_color(Stdout, |t| t.bold()),
        category,
        stored.id.as_deref().unwrap_or("-"),
    );
    Ok(())
}

pub(crate) fn run_edit(conn: &Connection, id: &str, changes: ItemChanges) -> Result<(), CliError> {
    let (category, mut item) = retro_shelf_db::store::find_item(conn, id)?
        .ok_or_else(|| CliError::other(format!("no item with id {id}")))?;

    // The date is validated before anything is written, so a bad date
    // aborts the whole edit.
    if let Some(date) = &changes.acquired {
        validate_acquired_date(date)?;
    }
    if let Some(price) = changes.price {
        if price < 0.0 {
            return Err(CliError::other("price must be non-negative"));
        }
        item.price = price;
    }

    if let Some(title) = changes.title {
        item.title = title;
    }
    if let Some(platform) = changes.platform {
        if let Some(created) = retro_shelf_db::registry::ensure_exists(conn, &platform)? {
            log::info!("Registered new platform '{}'", created.name);
        }
        item.platform = platform;
    }
    if let Some(date) = changes.acquired {
        item.acquired_date = Some(date);
    }
    if let Some(year) = changes.year {
        item.year = Some(year);
    }
    if let Some(genre) = changes.genre {
        item.genre = Some(genre);
    }
    if let Some(developer) = changes.developer {
        item.developer = Some(developer);
    }
    if let Some(notes) = changes.notes {
        item.notes = Some(notes);
    }
    if let Some(wishlist) = changes.wishlist {
        item.is_wishlist = wishlist;
    }

    let target = match changes.move_to {
        Some(target) if target != category => {
            require_item_category(target)?;
            // The record keeps its id and created_at across the move.
            retro_shelf_db::store::delete(conn, category, id)?;
            target
        }
        _ => category,
    };

    let stored = retro_shelf_db::store::put_item(conn, target, &item)?;
    log::info!(
        "{} Updated '{}' in {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        stored.title.if_supports_color(Stdout, |t| t.bold()),
        target,
    );
    Ok(())
}

pub(crate) fn run_rm(conn: &Connection, id: &str) -> Result<(), CliError> {
    let (category, item) = retro_shelf_db::store::find_item(conn, id)?
        .ok_or_else(|| CliError::other(format!("no item with id {id}")))?;

    retro_shelf_db::store::delete(conn, category, id)?;
    log::info!(
        "{} Removed '{}' from {}",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        item.title.if_supports_color(Stdout, |t| t.bold()),
        category,
    );
    Ok(())
}

pub(crate) fn run_check(conn: &Connection, id: &str) -> Result<(), CliError> {
    let (category, mut item) = retro_shelf_db::store::find_item(conn, id)?
        .ok_or_else(|| CliError::other(format!("no item with id {id}")))?;

    if item.is_validated {
        log::info!(
            "'{}' was already checked on {}",
            item.title,
            item.validated_date.as_deref().unwrap_or("an unknown date"),
        );
        return Ok(());
    }

    item.is_validated = true;
    item.validated_date = Some(chrono::Utc::now().to_rfc3339());
    retro_shelf_db::store::put_item(conn, category, &item)?;

    log::info!(
        "{} Checked '{}'",
        "\u{2714}".if_supports_color(Stdout, |t| t.green()),
        item.title.if_supports_color(Stdout, |t| t.bold()),
    );
    Ok(())
}

fn require_item_category(category: Category) -> Result<(), CliError> {
    if Category::ITEMS.contains(&category) {
        Ok(())
    } else {
        Err(CliError::other(format!("'{category}' does not hold items")))
    }
}
