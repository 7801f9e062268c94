use roadmap_core::db::migrations::latest_version;
use roadmap_core::db::{open_db, open_db_in_memory, DbError};
use roadmap_core::{
    GeneratorConfig, RoadmapGenerator, RoadmapStore, SaveMode, SqliteMedium, TemplateGenerator,
    Theme,
};

#[test]
fn migrations_set_user_version() {
    let conn = open_db_in_memory().unwrap();
    let version: u32 = conn
        .query_row("PRAGMA user_version;", [], |row| row.get(0))
        .unwrap();
    assert_eq!(version, latest_version());
}

#[test]
fn newer_schema_version_is_rejected() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmaps.sqlite3");
    {
        let conn = open_db(&path).unwrap();
        conn.execute_batch(&format!("PRAGMA user_version = {};", latest_version() + 1))
            .unwrap();
    }

    let err = open_db(&path).unwrap_err();
    assert!(matches!(
        err,
        DbError::SchemaTooNew { found, supported } if found == supported + 1
    ));
    assert!(err.to_string().contains("newer than this build"));
}

#[test]
fn roadmaps_and_theme_survive_reopen() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmaps.sqlite3");
    let generator = TemplateGenerator::new(GeneratorConfig::immediate());

    {
        let conn = open_db(&path).unwrap();
        let mut store = RoadmapStore::new(SqliteMedium::new(&conn));
        store
            .save(&generator.generate("Rust").unwrap(), SaveMode::Replace)
            .unwrap();
        store.set_item_completion("rust", "a4", true).unwrap();
        store.set_theme(Theme::Dark).unwrap();
    }

    let conn = open_db(&path).unwrap();
    let store = RoadmapStore::new(SqliteMedium::new(&conn));
    let saved = store.find_by_topic("RUST").unwrap().unwrap();
    assert_eq!(saved.completed_items, vec!["a4".to_string()]);
    assert_eq!(saved.roadmap.len(), 12);
    assert_eq!(store.theme().unwrap(), Theme::Dark);
}

#[test]
fn two_stores_on_one_file_lose_the_earlier_update() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("roadmaps.sqlite3");
    let generator = TemplateGenerator::new(GeneratorConfig::immediate());
    let conn_a = open_db(&path).unwrap();
    let conn_b = open_db(&path).unwrap();
    let mut tab_a = RoadmapStore::new(SqliteMedium::new(&conn_a));
    let mut tab_b = RoadmapStore::new(SqliteMedium::new(&conn_b));

    tab_a
        .save(&generator.generate("Rust").unwrap(), SaveMode::Replace)
        .unwrap();
    let stale = tab_b.find_by_topic("Rust").unwrap().unwrap();
    tab_a.set_item_completion("Rust", "b1", true).unwrap();
    tab_b.save(&stale, SaveMode::Replace).unwrap();

    let saved = tab_a.find_by_topic("Rust").unwrap().unwrap();
    assert!(saved.completed_items.is_empty());
}
