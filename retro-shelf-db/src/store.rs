//! The local store: schemaless per-category record CRUD.
//!
//! Records are JSON objects keyed by `id` within a category. `put` is an
//! upsert: it assigns an id when the record has none, stamps `createdAt`
//! exactly once, and refreshes `updatedAt` on every write. Writes persist
//! immediately; there is no batching and no cross-category transaction,
//! so bulk loops that fail partway leave mixed state.

use retro_shelf_catalog::{Category, Item, new_record_id};
use rusqlite::{Connection, OptionalExtension, params};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("record must be a JSON object")]
    NotAnObject,
}

/// All records in a category, in unspecified order.
pub fn get_all(conn: &Connection, category: Category) -> Result<Vec<Value>, StoreError> {
    let mut stmt = conn.prepare("SELECT data FROM records WHERE category = ?1")?;
    let rows = stmt.query_map(params![category.as_str()], |row| row.get::<_, String>(0))?;

    let mut records = Vec::new();
    for row in rows {
        records.push(serde_json::from_str(&row?)?);
    }
    Ok(records)
}

/// A single record by id.
pub fn get(conn: &Connection, category: Category, id: &str) -> Result<Option<Value>, StoreError> {
    let data: Option<String> = conn
        .query_row(
            "SELECT data FROM records WHERE category = ?1 AND id = ?2",
            params![category.as_str(), id],
            |row| row.get(0),
        )
        .optional()?;

    match data {
        Some(raw) => Ok(Some(serde_json::from_str(&raw)?)),
        None => Ok(None),
    }
}

/// Insert or update a record, returning it with id and timestamps filled in.
pub fn put(conn: &Connection, category: Category, mut record: Value) -> Result<Value, StoreError> {
    let now = chrono::Utc::now().to_rfc3339();

    let id = {
        let obj = record.as_object_mut().ok_or(StoreError::NotAnObject)?;
        match obj.get("id").and_then(Value::as_str).filter(|s| !s.is_empty()) {
            Some(existing) => existing.to_string(),
            None => {
                let fresh = new_record_id();
                obj.insert("id".to_string(), Value::String(fresh.clone()));
                fresh
            }
        }
    };

    // createdAt is stamped once. An update that dropped the field gets the
    // original value restored from the stored row.
    let created_at = match record
        .get("createdAt")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
    {
        Some(s) => s.to_string(),
        None => get(conn, category, &id)?
            .and_then(|existing| {
                existing
                    .get("createdAt")
                    .and_then(Value::as_str)
                    .map(str::to_string)
            })
            .unwrap_or_else(|| now.clone()),
    };

    let obj = record.as_object_mut().ok_or(StoreError::NotAnObject)?;
    obj.insert("createdAt".to_string(), Value::String(created_at));
    obj.insert("updatedAt".to_string(), Value::String(now));

    conn.execute(
        "INSERT INTO records (category, id, data) VALUES (?1, ?2, ?3)
         ON CONFLICT(category, id) DO UPDATE SET data = excluded.data",
        params![category.as_str(), id, serde_json::to_string(&record)?],
    )?;

    Ok(record)
}

/// Remove one record. Deleting an absent id is not an error.
pub fn delete(conn: &Connection, category: Category, id: &str) -> Result<bool, StoreError> {
    let changed = conn.execute(
        "DELETE FROM records WHERE category = ?1 AND id = ?2",
        params![category.as_str(), id],
    )?;
    Ok(changed > 0)
}

/// Remove every record in a category.
pub fn clear(conn: &Connection, category: Category) -> Result<(), StoreError> {
    conn.execute(
        "DELETE FROM records WHERE category = ?1",
        params![category.as_str()],
    )?;
    Ok(())
}

/// Record count for a category.
pub fn count(conn: &Connection, category: Category) -> Result<usize, StoreError> {
    let n: i64 = conn.query_row(
        "SELECT COUNT(*) FROM records WHERE category = ?1",
        params![category.as_str()],
        |row| row.get(0),
    )?;
    Ok(n as usize)
}

// ---------------------------------------------------------------------------
// Typed item access
// ---------------------------------------------------------------------------

/// All items in a category.
pub fn get_items(conn: &Connection, category: Category) -> Result<Vec<Item>, StoreError> {
    get_all(conn, category)?
        .into_iter()
        .map(|v| serde_json::from_value(v).map_err(StoreError::from))
        .collect()
}

/// A single item by id.
pub fn get_item(
    conn: &Connection,
    category: Category,
    id: &str,
) -> Result<Option<Item>, StoreError> {
    match get(conn, category, id)? {
        Some(value) => Ok(Some(serde_json::from_value(value)?)),
        None => Ok(None),
    }
}

/// Upsert an item, returning it with id and timestamps filled in.
pub fn put_item(conn: &Connection, category: Category, item: &Item) -> Result<Item, StoreError> {
    let stored = put(conn, category, serde_json::to_value(item)?)?;
    Ok(serde_json::from_value(stored)?)
}

/// Locate an item by id across both item categories.
pub fn find_item(conn: &Connection, id: &str) -> Result<Option<(Category, Item)>, StoreError> {
    for category in Category::ITEMS {
        if let Some(item) = get_item(conn, category, id)? {
            return Ok(Some((category, item)));
        }
    }
    Ok(None)
}
