//! The platform registry: CRUD over the `platforms` category.
//!
//! Names are unique case-insensitively. A platform cannot be deleted while
//! any item still references its name. Renames cascade to referencing
//! items so the name-by-value link never dangles.

use retro_shelf_catalog::{Category, Platform};
use rusqlite::Connection;
use serde_json::Value;
use thiserror::Error;

use crate::store::{self, StoreError};

#[derive(Debug, Error)]
pub enum RegistryError {
    #[error(transparent)]
    Store(#[from] StoreError),
    #[error("platform '{name}' cannot be deleted: {item_count} item(s) still reference it")]
    PlatformInUse { name: String, item_count: usize },
    #[error("platform not found: {id}")]
    NotFound { id: String },
    #[error("platform record is missing an id")]
    MissingId,
}

/// All platforms sorted by name ascending.
pub fn list(conn: &Connection) -> Result<Vec<Platform>, RegistryError> {
    let mut platforms: Vec<Platform> = store::get_all(conn, Category::Platforms)?
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(StoreError::from))
        .collect::<Result<_, _>>()?;
    platforms.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(platforms)
}

/// Find a platform by id.
pub fn find(conn: &Connection, id: &str) -> Result<Option<Platform>, RegistryError> {
    match store::get(conn, Category::Platforms, id)? {
        Some(value) => Ok(Some(
            serde_json::from_value(value).map_err(StoreError::from)?,
        )),
        None => Ok(None),
    }
}

/// Find a platform whose name matches case-insensitively.
pub fn find_by_name(conn: &Connection, name: &str) -> Result<Option<Platform>, RegistryError> {
    let needle = name.trim().to_lowercase();
    Ok(list(conn)?
        .into_iter()
        .find(|p| p.name.to_lowercase() == needle))
}

/// Add a new platform.
///
/// Returns `Ok(None)` when a case-insensitive duplicate already exists;
/// the caller decides how to report that. No record is written in that case.
pub fn add(
    conn: &Connection,
    name: &str,
    logo: Option<String>,
) -> Result<Option<Platform>, RegistryError> {
    let name = name.trim();
    if find_by_name(conn, name)?.is_some() {
        return Ok(None);
    }

    let platform = Platform {
        id: None,
        name: name.to_string(),
        logo,
    };
    let stored = store::put(conn, Category::Platforms, serde_json::to_value(&platform).map_err(StoreError::from)?)?;
    Ok(Some(
        serde_json::from_value(stored).map_err(StoreError::from)?,
    ))
}

/// Upsert a platform keyed by id.
///
/// When the update changes the name, every item referencing the old name is
/// renamed in the same pass. Items link to platforms by name, so leaving
/// them behind would orphan the reference.
pub fn update(conn: &Connection, platform: &Platform) -> Result<Platform, RegistryError> {
    let id = platform.id.as_deref().ok_or(RegistryError::MissingId)?;
    let previous = find(conn, id)?;

    let stored = store::put(
        conn,
        Category::Platforms,
        serde_json::to_value(platform).map_err(StoreError::from)?,
    )?;
    let stored: Platform = serde_json::from_value(stored).map_err(StoreError::from)?;

    if let Some(previous) = previous {
        if previous.name != stored.name {
            let renamed = cascade_rename(conn, &previous.name, &stored.name)?;
            if renamed > 0 {
                log::info!(
                    "renamed platform on {} item(s): '{}' -> '{}'",
                    renamed,
                    previous.name,
                    stored.name
                );
            }
        }
    }

    Ok(stored)
}

/// Delete a platform by id.
///
/// Fails with [`RegistryError::PlatformInUse`] if any item in either item
/// category references the platform's name; nothing is modified in that case.
pub fn delete(conn: &Connection, id: &str) -> Result<(), RegistryError> {
    let platform = find(conn, id)?.ok_or_else(|| RegistryError::NotFound { id: id.to_string() })?;

    let mut referencing = 0usize;
    for category in Category::ITEMS {
        referencing += store::get_items(conn, category)?
            .iter()
            .filter(|item| item.platform == platform.name)
            .count();
    }

    if referencing > 0 {
        return Err(RegistryError::PlatformInUse {
            name: platform.name,
            item_count: referencing,
        });
    }

    store::delete(conn, Category::Platforms, id)?;
    Ok(())
}

/// Auto-create a platform when no case-insensitive match exists.
///
/// Used by bulk import so free-text platform strings become registry
/// entries. Returns the created platform, or `None` when one already
/// existed (or the name was blank).
pub fn ensure_exists(conn: &Connection, name: &str) -> Result<Option<Platform>, RegistryError> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(None);
    }
    if find_by_name(conn, name)?.is_some() {
        return Ok(None);
    }
    let created = add(conn, name, None)?;
    if created.is_some() {
        log::debug!("auto-created platform: {name}");
    }
    Ok(created)
}

fn cascade_rename(conn: &Connection, from: &str, to: &str) -> Result<usize, RegistryError> {
    let mut renamed = 0usize;
    for category in Category::ITEMS {
        for mut value in store::get_all(conn, category)? {
            let matches = value.get("platform").and_then(Value::as_str) == Some(from);
            if matches {
                if let Some(obj) = value.as_object_mut() {
                    obj.insert("platform".to_string(), Value::String(to.to_string()));
                }
                store::put(conn, category, value)?;
                renamed += 1;
            }
        }
    }
    Ok(renamed)
}
