use retro_shelf_catalog::{Category, Item, Snapshot};
use retro_shelf_db::{open_memory, registry, store};
use retro_shelf_sync::{apply_snapshot, export_snapshot, read_snapshot_file, write_snapshot_file};

fn seeded_connection() -> rusqlite::Connection {
    let conn = open_memory().unwrap();
    registry::add(&conn, "Mega Drive", None).unwrap().unwrap();
    registry::add(&conn, "Saturn", None).unwrap().unwrap();

    let mut sonic = Item::new("Sonic 2", "Mega Drive");
    sonic.price = 24.5;
    sonic.acquired_date = Some("01/06/2019".to_string());
    store::put_item(&conn, Category::Games, &sonic).unwrap();

    let mut nights = Item::new("Nights", "Saturn");
    nights.is_wishlist = true;
    store::put_item(&conn, Category::Games, &nights).unwrap();

    store::put_item(&conn, Category::Consoles, &Item::new("Saturn (Model 2)", "Saturn")).unwrap();
    conn
}

#[test]
fn export_then_import_is_identity_on_the_record_set() {
    let source = seeded_connection();
    let snapshot = export_snapshot(&source).unwrap();

    let target = open_memory().unwrap();
    let stats = apply_snapshot(&target, &snapshot).unwrap();
    assert_eq!(stats.games, 2);
    assert_eq!(stats.consoles, 1);
    assert_eq!(stats.platforms, 2);

    let mut original = store::get_items(&source, Category::Games).unwrap();
    let mut restored = store::get_items(&target, Category::Games).unwrap();
    original.sort_by(|a, b| a.title.cmp(&b.title));
    restored.sort_by(|a, b| a.title.cmp(&b.title));

    assert_eq!(original.len(), restored.len());
    for (a, b) in original.iter().zip(&restored) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.platform, b.platform);
        assert_eq!(a.price, b.price);
        assert_eq!(a.acquired_date, b.acquired_date);
        assert_eq!(a.is_wishlist, b.is_wishlist);
        assert_eq!(a.created_at, b.created_at);
    }

    let original_platforms = registry::list(&source).unwrap();
    let restored_platforms = registry::list(&target).unwrap();
    assert_eq!(original_platforms, restored_platforms);
}

#[test]
fn import_is_a_full_replace_not_a_merge() {
    let conn = open_memory().unwrap();
    store::put_item(&conn, Category::Games, &Item::new("A", "NES")).unwrap();
    store::put_item(&conn, Category::Games, &Item::new("B", "NES")).unwrap();

    let incoming = Snapshot::new(vec![Item::new("C", "SNES")], vec![], vec![]);
    apply_snapshot(&conn, &incoming).unwrap();

    let games = store::get_items(&conn, Category::Games).unwrap();
    assert_eq!(games.len(), 1);
    assert_eq!(games[0].title, "C");
    assert_eq!(store::count(&conn, Category::Platforms).unwrap(), 0);
}

#[test]
fn file_round_trip_preserves_the_snapshot() {
    let conn = seeded_connection();
    let snapshot = export_snapshot(&conn).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("shelf.json");
    write_snapshot_file(&path, &snapshot).unwrap();

    let reread = read_snapshot_file(&path).unwrap();
    assert_eq!(reread.version, snapshot.version);
    assert_eq!(reread.games.len(), snapshot.games.len());
    assert_eq!(reread.consoles.len(), snapshot.consoles.len());
    assert_eq!(reread.platforms, snapshot.platforms);
}

#[test]
fn applying_an_empty_snapshot_empties_the_store() {
    let conn = seeded_connection();
    let stats = apply_snapshot(&conn, &Snapshot::default()).unwrap();
    assert_eq!(stats.total(), 0);
    assert_eq!(store::count(&conn, Category::Games).unwrap(), 0);
    assert_eq!(store::count(&conn, Category::Consoles).unwrap(), 0);
    assert_eq!(store::count(&conn, Category::Platforms).unwrap(), 0);
}
