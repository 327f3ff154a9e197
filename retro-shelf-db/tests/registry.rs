use retro_shelf_catalog::{Category, Item};
use retro_shelf_db::registry;
use retro_shelf_db::store;
use retro_shelf_db::{RegistryError, open_memory};

#[test]
fn add_and_list_sorted_by_name() {
    let conn = open_memory().unwrap();
    registry::add(&conn, "Saturn", None).unwrap().unwrap();
    registry::add(&conn, "Dreamcast", None).unwrap().unwrap();
    registry::add(&conn, "Mega Drive", None).unwrap().unwrap();

    let names: Vec<String> = registry::list(&conn).unwrap().into_iter().map(|p| p.name).collect();
    assert_eq!(names, vec!["Dreamcast", "Mega Drive", "Saturn"]);
}

#[test]
fn duplicate_names_are_rejected_case_insensitively() {
    let conn = open_memory().unwrap();
    registry::add(&conn, "Mega Drive", None).unwrap().unwrap();

    assert!(registry::add(&conn, "mega drive", None).unwrap().is_none());
    assert!(registry::add(&conn, "MEGA DRIVE", None).unwrap().is_none());
    assert_eq!(registry::list(&conn).unwrap().len(), 1);
}

#[test]
fn delete_fails_while_items_reference_the_platform() {
    let conn = open_memory().unwrap();
    let platform = registry::add(&conn, "Saturn", None).unwrap().unwrap();
    store::put_item(&conn, Category::Games, &Item::new("Nights", "Saturn")).unwrap();

    let err = registry::delete(&conn, platform.id.as_deref().unwrap()).unwrap_err();
    match err {
        RegistryError::PlatformInUse { name, item_count } => {
            assert_eq!(name, "Saturn");
            assert_eq!(item_count, 1);
        }
        other => panic!("expected PlatformInUse, got {other:?}"),
    }

    // Nothing was modified
    assert_eq!(registry::list(&conn).unwrap().len(), 1);
    assert_eq!(store::count(&conn, Category::Games).unwrap(), 1);
}

#[test]
fn delete_succeeds_for_unreferenced_platform() {
    let conn = open_memory().unwrap();
    let keep = registry::add(&conn, "Saturn", None).unwrap().unwrap();
    let drop = registry::add(&conn, "Jaguar", None).unwrap().unwrap();
    store::put_item(&conn, Category::Games, &Item::new("Nights", "Saturn")).unwrap();

    registry::delete(&conn, drop.id.as_deref().unwrap()).unwrap();

    let remaining = registry::list(&conn).unwrap();
    assert_eq!(remaining.len(), 1);
    assert_eq!(remaining[0].id, keep.id);
}

#[test]
fn delete_unknown_id_is_not_found() {
    let conn = open_memory().unwrap();
    assert!(matches!(
        registry::delete(&conn, "missing"),
        Err(RegistryError::NotFound { .. })
    ));
}

#[test]
fn ensure_exists_auto_creates_once() {
    let conn = open_memory().unwrap();

    let created = registry::ensure_exists(&conn, "  PS2  ").unwrap();
    assert_eq!(created.unwrap().name, "PS2");

    // Case-insensitive match means no second record
    assert!(registry::ensure_exists(&conn, "ps2").unwrap().is_none());
    assert!(registry::ensure_exists(&conn, "").unwrap().is_none());
    assert_eq!(registry::list(&conn).unwrap().len(), 1);
}

#[test]
fn rename_cascades_to_referencing_items() {
    let conn = open_memory().unwrap();
    let mut platform = registry::add(&conn, "Megadrive", None).unwrap().unwrap();
    store::put_item(&conn, Category::Games, &Item::new("Sonic 2", "Megadrive")).unwrap();
    store::put_item(&conn, Category::Consoles, &Item::new("Model 2", "Megadrive")).unwrap();
    store::put_item(&conn, Category::Games, &Item::new("Tetris", "Game Boy")).unwrap();

    platform.name = "Mega Drive".to_string();
    registry::update(&conn, &platform).unwrap();

    let games = store::get_items(&conn, Category::Games).unwrap();
    let sonic = games.iter().find(|i| i.title == "Sonic 2").unwrap();
    let tetris = games.iter().find(|i| i.title == "Tetris").unwrap();
    assert_eq!(sonic.platform, "Mega Drive");
    assert_eq!(tetris.platform, "Game Boy");

    let consoles = store::get_items(&conn, Category::Consoles).unwrap();
    assert_eq!(consoles[0].platform, "Mega Drive");
}

#[test]
fn update_requires_an_id() {
    let conn = open_memory().unwrap();
    let platform = retro_shelf_catalog::Platform::new("Neo Geo");
    assert!(matches!(
        registry::update(&conn, &platform),
        Err(RegistryError::MissingId)
    ));
}

#[test]
fn update_can_set_logo_without_touching_items() {
    let conn = open_memory().unwrap();
    let mut platform = registry::add(&conn, "Saturn", None).unwrap().unwrap();
    store::put_item(&conn, Category::Games, &Item::new("Nights", "Saturn")).unwrap();

    platform.logo = Some("https://example.net/saturn.png".to_string());
    let updated = registry::update(&conn, &platform).unwrap();
    assert_eq!(updated.logo.as_deref(), Some("https://example.net/saturn.png"));

    let games = store::get_items(&conn, Category::Games).unwrap();
    assert_eq!(games[0].platform, "Saturn");
}
