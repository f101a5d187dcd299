// End-to-end flow over the SQLite-backed store

use std::fs;

use firstleaf_app_lib::db::kv_store::{KeyValueStore, SqliteKeyValueStore};
use firstleaf_app_lib::db::DbPool;
use firstleaf_app_lib::models::appreciation::AppreciationKind;
use firstleaf_app_lib::models::wall::SortKey;
use firstleaf_app_lib::services::appreciation_service::AppreciationStore;
use firstleaf_app_lib::services::contributor_service::load_contributors;
use firstleaf_app_lib::services::spotlight_service::SpotlightPicker;
use firstleaf_app_lib::services::wall_service::WallController;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tempfile::{tempdir, TempDir};

const DATA: &str = r#"{"username":"bob","name":"Bob","addedAt":"2024-01-01","badges":["helper"]}
this line is not json
{"username":"al","name":"Al","addedAt":"2024-02-01","badges":["core",{"type":"custom","text":"Docs"}]}

{"username":"cy","addedAt":"2023-12-24","message":"hi"}
"#;

fn setup_wall() -> (WallController<SqliteKeyValueStore>, DbPool, TempDir) {
    let dir = tempdir().expect("temp dir");
    let data_path = dir.path().join("contributors.ndjson");
    fs::write(&data_path, DATA).expect("write data");

    let pool = DbPool::new(dir.path().join("wall.sqlite")).expect("db pool");
    let records = load_contributors(&data_path).expect("load contributors");
    let wall = WallController::with_picker(
        records,
        AppreciationStore::new(SqliteKeyValueStore::new(pool.clone())),
        SpotlightPicker::with_rng(StdRng::seed_from_u64(42)),
    );
    (wall, pool, dir)
}

#[test]
fn loads_valid_lines_and_renders_newest_first() {
    let (wall, _pool, _dir) = setup_wall();
    let snapshot = wall.snapshot();

    let usernames: Vec<_> = snapshot.cards.iter().map(|c| c.username.as_str()).collect();
    assert_eq!(usernames, ["al", "bob", "cy"]);
    assert_eq!(snapshot.stats.total_count, 3);
    assert_eq!(snapshot.stats.latest_contributor.as_deref(), Some("Al"));
    assert!(snapshot.cards[0].is_newest);
    assert_eq!(snapshot.cards[0].badges.len(), 2);
    assert_eq!(snapshot.cards[2].display_name, "Anonymous");
    assert_eq!(snapshot.cards[2].message.as_deref(), Some("hi"));
}

#[test]
fn search_badge_and_sort_work_together() {
    let (mut wall, _pool, _dir) = setup_wall();

    let outcome = wall.set_search("B");
    assert_eq!(outcome.visible_count, 1);
    assert_eq!(outcome.summary, "1 of 3 contributors match search");

    let outcome = wall.toggle_badge("helper");
    assert_eq!(outcome.summary, "1 contributors with \"Helper\" badge match search");

    wall.set_search("");
    let outcome = wall.set_sort(SortKey::Oldest);
    assert_eq!(outcome.visible, vec![false, true, false]);
    assert_eq!(outcome.summary, "1 contributors with \"Helper\" badge");

    let outcome = wall.toggle_badge("helper");
    assert_eq!(outcome.summary, "Showing all 3 contributors");
    assert_eq!(outcome.count_label, "3 contributors");
}

#[test]
fn appreciation_persists_in_sqlite() {
    let (wall, pool, _dir) = setup_wall();

    assert_eq!(wall.appreciate("al", AppreciationKind::Clap), Some(1));
    assert_eq!(wall.appreciate("al", AppreciationKind::Heart), Some(2));
    assert_eq!(wall.appreciate("al", AppreciationKind::Clap), None);

    let reopened = AppreciationStore::new(SqliteKeyValueStore::new(pool.clone()));
    let entry = reopened.entry("al");
    assert_eq!(entry.sent, vec!["clap".to_string(), "heart".to_string()]);
    assert_eq!(entry.total(), 2);

    let raw = SqliteKeyValueStore::new(pool)
        .get("appreciation")
        .expect("read")
        .expect("blob present");
    assert!(raw.contains("\"al\""));

    let card = wall
        .snapshot()
        .cards
        .into_iter()
        .find(|card| card.username == "al")
        .expect("al card");
    assert_eq!(card.appreciation.total_label, "Total: 2 appreciations");
}

#[test]
fn spotlight_cycles_without_repeats() {
    let (mut wall, _pool, _dir) = setup_wall();
    let mut previous = wall.spotlight().expect("spotlight").index;
    for _ in 0..30 {
        let card = wall.spotlight().expect("spotlight");
        assert_ne!(card.index, previous);
        previous = card.index;
    }
}

#[test]
fn empty_data_file_gives_an_empty_wall() {
    let dir = tempdir().expect("temp dir");
    let data_path = dir.path().join("contributors.ndjson");
    fs::write(&data_path, "\n\n").expect("write data");

    let pool = DbPool::new(dir.path().join("wall.sqlite")).expect("db pool");
    let mut wall = WallController::new(
        load_contributors(&data_path).expect("load"),
        AppreciationStore::new(SqliteKeyValueStore::new(pool)),
    );

    assert!(wall.spotlight().is_none());
    let snapshot = wall.snapshot();
    assert!(snapshot.cards.is_empty());
    assert_eq!(snapshot.stats.latest_contributor, None);
    assert_eq!(snapshot.filter.count_label, "0 contributors");
}
