use retro_shelf_catalog::Category;
use retro_shelf_import::{apply_bulk, parse_bulk_text};

#[test]
fn bulk_import_creates_items_and_platforms() {
    let conn = retro_shelf_db::open_memory().unwrap();

    let report = parse_bulk_text("PS2;Sonic Heroes\nPS2;Okami\nMega Drive;Sonic 2\n").unwrap();
    let stats = apply_bulk(&conn, Category::Games, &report.entries).unwrap();

    assert_eq!(stats.items_created, 3);
    assert_eq!(stats.platforms_created, 2);
    assert_eq!(stats.duplicates_skipped, 0);

    let games = retro_shelf_db::store::get_items(&conn, Category::Games).unwrap();
    assert_eq!(games.len(), 3);
    assert!(games.iter().all(|g| g.id.is_some()));

    let platforms = retro_shelf_db::registry::list(&conn).unwrap();
    let names: Vec<&str> = platforms.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Mega Drive", "PS2"]);
}

#[test]
fn bulk_import_skips_duplicate_titles_on_the_same_platform() {
    let conn = retro_shelf_db::open_memory().unwrap();

    let first = parse_bulk_text("PS2;Okami\n").unwrap();
    apply_bulk(&conn, Category::Games, &first.entries).unwrap();

    // Same title again, differing only in case, plus the same title on
    // another platform which must go through.
    let second = parse_bulk_text("PS2;OKAMI\nWii;Okami\n").unwrap();
    let stats = apply_bulk(&conn, Category::Games, &second.entries).unwrap();

    assert_eq!(stats.items_created, 1);
    assert_eq!(stats.duplicates_skipped, 1);

    let games = retro_shelf_db::store::get_items(&conn, Category::Games).unwrap();
    assert_eq!(games.len(), 2);
}

#[test]
fn reapplying_the_same_list_is_a_no_op() {
    let conn = retro_shelf_db::open_memory().unwrap();

    let report = parse_bulk_text("SNES;Chrono Trigger\nSNES;Earthbound\n").unwrap();
    apply_bulk(&conn, Category::Games, &report.entries).unwrap();
    let stats = apply_bulk(&conn, Category::Games, &report.entries).unwrap();

    assert_eq!(stats.items_created, 0);
    assert_eq!(stats.duplicates_skipped, 2);
    assert_eq!(stats.platforms_created, 0);
}
