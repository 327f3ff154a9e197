use retro_shelf_catalog::{Category, Item};
use retro_shelf_db::store;
use retro_shelf_db::{open_database, open_memory};

fn sample_item(title: &str, platform: &str) -> Item {
    let mut item = Item::new(title, platform);
    item.price = 19.99;
    item
}

#[test]
fn put_assigns_id_and_timestamps() {
    let conn = open_memory().unwrap();
    let stored = store::put_item(&conn, Category::Games, &sample_item("Sonic 2", "Mega Drive")).unwrap();

    let id = stored.id.expect("id assigned on first put");
    assert!(!id.is_empty());
    assert!(stored.created_at.is_some());
    assert!(stored.updated_at.is_some());

    let fetched = store::get_item(&conn, Category::Games, &id).unwrap().unwrap();
    assert_eq!(fetched.title, "Sonic 2");
    assert_eq!(fetched.price, 19.99);
}

#[test]
fn created_at_survives_updates() {
    let conn = open_memory().unwrap();
    let stored = store::put_item(&conn, Category::Games, &sample_item("Rez", "Dreamcast")).unwrap();
    let original_created = stored.created_at.clone().unwrap();

    let mut edited = stored.clone();
    edited.title = "Rez (PAL)".to_string();
    let updated = store::put_item(&conn, Category::Games, &edited).unwrap();

    assert_eq!(updated.id, stored.id);
    assert_eq!(updated.created_at.as_deref(), Some(original_created.as_str()));

    // Even an edit that lost the field gets it restored from the stored row
    let mut stripped = updated.clone();
    stripped.created_at = None;
    let restored = store::put_item(&conn, Category::Games, &stripped).unwrap();
    assert_eq!(restored.created_at.as_deref(), Some(original_created.as_str()));
}

#[test]
fn put_is_an_upsert_by_id() {
    let conn = open_memory().unwrap();
    let stored = store::put_item(&conn, Category::Consoles, &sample_item("Saturn", "Sega")).unwrap();

    let mut edited = stored.clone();
    edited.notes = Some("boxed".to_string());
    store::put_item(&conn, Category::Consoles, &edited).unwrap();

    assert_eq!(store::count(&conn, Category::Consoles).unwrap(), 1);
    let fetched = store::get_item(&conn, Category::Consoles, stored.id.as_deref().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(fetched.notes.as_deref(), Some("boxed"));
}

#[test]
fn delete_and_clear() {
    let conn = open_memory().unwrap();
    let a = store::put_item(&conn, Category::Games, &sample_item("A", "NES")).unwrap();
    store::put_item(&conn, Category::Games, &sample_item("B", "NES")).unwrap();

    assert!(store::delete(&conn, Category::Games, a.id.as_deref().unwrap()).unwrap());
    assert!(!store::delete(&conn, Category::Games, "missing").unwrap());
    assert_eq!(store::count(&conn, Category::Games).unwrap(), 1);

    store::clear(&conn, Category::Games).unwrap();
    assert_eq!(store::count(&conn, Category::Games).unwrap(), 0);
}

#[test]
fn categories_are_isolated() {
    let conn = open_memory().unwrap();
    store::put_item(&conn, Category::Games, &sample_item("Tetris", "Game Boy")).unwrap();
    store::put_item(&conn, Category::Consoles, &sample_item("Game Boy", "Nintendo")).unwrap();

    store::clear(&conn, Category::Games).unwrap();
    assert_eq!(store::count(&conn, Category::Games).unwrap(), 0);
    assert_eq!(store::count(&conn, Category::Consoles).unwrap(), 1);
}

#[test]
fn find_item_searches_both_item_categories() {
    let conn = open_memory().unwrap();
    let console = store::put_item(&conn, Category::Consoles, &sample_item("PC Engine", "NEC")).unwrap();

    let (category, found) = store::find_item(&conn, console.id.as_deref().unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(category, Category::Consoles);
    assert_eq!(found.title, "PC Engine");

    assert!(store::find_item(&conn, "nope").unwrap().is_none());
}

#[test]
fn put_surfaces_lookup_failures_instead_of_restamping() {
    let conn = open_memory().unwrap();
    let stored = store::put_item(&conn, Category::Games, &sample_item("Rez", "Dreamcast")).unwrap();

    conn.execute_batch("DROP TABLE records").unwrap();

    // A put that has to consult the stored row must report the failure
    // rather than silently minting a fresh createdAt
    let mut stripped = stored;
    stripped.created_at = None;
    assert!(store::put_item(&conn, Category::Games, &stripped).is_err());
}

#[test]
fn rejects_non_object_records() {
    let conn = open_memory().unwrap();
    let result = store::put(&conn, Category::Games, serde_json::json!([1, 2, 3]));
    assert!(result.is_err());
}

#[test]
fn open_database_is_idempotent_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.db");

    {
        let conn = open_database(&path).unwrap();
        store::put_item(&conn, Category::Games, &sample_item("Panzer Dragoon", "Saturn")).unwrap();
    }

    let conn = open_database(&path).unwrap();
    assert_eq!(store::count(&conn, Category::Games).unwrap(), 1);
}
