//! Catalog loading from files and manifest directories.

use std::fs;
use std::path::Path;
use timeline_core::{Category, Difficulty, Era, GameConfig, GameSession};
use timeline_game::{Catalog, Filters, MANIFEST_FILE, Settings};

fn event_json(name: &str, year: i64, category: &str, difficulty: &str) -> String {
    serde_json::json!({
        "name": name,
        "friendly_name": name,
        "year": year,
        "category": category,
        "difficulty": difficulty,
        "description": format!("about {name}"),
    })
    .to_string()
}

fn write(dir: &Path, file: &str, content: &str) {
    fs::write(dir.join(file), content).expect("write fixture");
}

fn sample_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().expect("tempdir");
    write(
        dir.path(),
        MANIFEST_FILE,
        r#"{"categories": [
            {"name": "conflict", "files": ["conflict.json"]},
            {"name": "exploration", "files": ["exploration.json", "missing.json"]},
            {"name": "broken", "files": ["broken.json"]}
        ]}"#,
    );
    write(
        dir.path(),
        "conflict.json",
        &format!(
            "[{}, {}]",
            event_json("hastings", 1066, "conflict", "easy"),
            event_json("waterloo", 1815, "conflict", "medium")
        ),
    );
    write(
        dir.path(),
        "exploration.json",
        &format!(
            "[{}, {}, {}]",
            event_json("moon", 1969, "exploration", "easy"),
            event_json("hastings", 1900, "exploration", "hard"),
            event_json("bogus", 1, "unknown", "easy")
        ),
    );
    write(dir.path(), "broken.json", "{ not json");
    dir
}

#[test]
fn test_load_dir_skips_bad_files_and_records() {
    let dir = sample_dir();
    let catalog = Catalog::load_dir(dir.path()).expect("manifest loads");

    let ids: Vec<_> = catalog.events().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["hastings", "waterloo", "moon"]);
    assert_eq!(catalog.events()[0].year, 1066);
}

#[test]
fn test_load_dispatches_on_path_kind() {
    let dir = sample_dir();
    assert_eq!(Catalog::load(dir.path()).expect("dir").len(), 3);
    assert_eq!(Catalog::load(dir.path().join("conflict.json")).expect("file").len(), 2);
}

#[test]
fn test_missing_manifest_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    let error = Catalog::load_dir(dir.path()).unwrap_err();
    assert!(error.message.contains("manifest"));
}

#[test]
fn test_missing_file_is_error() {
    let dir = tempfile::tempdir().expect("tempdir");
    assert!(Catalog::load_file(dir.path().join("nope.json")).is_err());
}

#[test]
fn test_filters_from_settings_feed_a_session() {
    let dir = sample_dir();
    let catalog = Catalog::load_dir(dir.path()).expect("manifest loads");

    let toml = "difficulties = [\"easy\"]\nstarting_timeline_events = 1\ncards_per_player = 1";
    let settings = Settings::from_toml_str(toml).expect("valid");
    let config = settings.to_config().expect("in bounds");
    let pool = catalog.filter(&Filters::from_config(&config));
    assert_eq!(pool.len(), 2);

    let mut session = GameSession::new(pool, Some(5));
    let state = session.start(config).expect("starts");
    assert_eq!(state.timeline().len(), 1);
    assert_eq!(state.players()[0].hand.len(), 1);
}

#[test]
fn test_era_and_category_filters() {
    let dir = sample_dir();
    let catalog = Catalog::load_dir(dir.path()).expect("manifest loads");

    let industrial_conflict = Filters::new()
        .with_categories(vec![Category::Conflict])
        .with_eras(vec![Era::Industrial]);
    let ids: Vec<_> = catalog
        .filter(&industrial_conflict)
        .into_iter()
        .map(|e| e.id.to_string())
        .collect();
    assert_eq!(ids, vec!["waterloo"]);

    let hard = Filters::new().with_difficulties(vec![Difficulty::Hard]);
    assert!(catalog.filter(&hard).is_empty());
}

#[test]
fn test_bundled_catalog_loads() {
    let dir = Path::new(env!("CARGO_MANIFEST_DIR")).join("data/events");
    let catalog = Catalog::load_dir(&dir).expect("bundled catalog");
    assert_eq!(catalog.len(), 30);

    let mut session = GameSession::new(catalog.into_events(), Some(1));
    assert!(session.start(GameConfig::new(4, 5, 3)).is_ok());
}

#[test]
fn test_deal_pool_refuses_timeline_only_pool() {
    let dir = sample_dir();
    let catalog = Catalog::load_dir(dir.path()).expect("manifest loads");

    let error = catalog
        .deal_pool(&Filters::new(), &GameConfig::new(1, 1, 3))
        .unwrap_err();
    assert!(error.message.contains("no cards are left for hands"));

    let hard = Filters::new().with_difficulties(vec![Difficulty::Hard]);
    assert!(catalog.deal_pool(&hard, &GameConfig::new(1, 1, 1)).is_err());

    let pool = catalog
        .deal_pool(&Filters::new(), &GameConfig::new(2, 5, 2))
        .expect("one hand card is enough");
    assert_eq!(pool.len(), 3);
}
