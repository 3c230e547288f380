//! Tests for the saved-sets store.

use super::*;
use crate::ability::Mechanics;
use std::fs;
use tempfile::TempDir;

fn ability(name: &str) -> AbilitySpec {
    AbilitySpec {
        name: Some(name.to_string()),
        summary: Some(format!("{} summary", name)),
        mechanics: Mechanics {
            dc: Some("15".into()),
            ..Default::default()
        },
        ..Default::default()
    }
}

#[test]
fn test_store_file_uses_namespace_key() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());
    assert_eq!(store.path(), temp.path().join("df_ability_sets_v1.json"));
}

#[test]
fn test_missing_file_is_empty() {
    let temp = TempDir::new().unwrap();
    assert!(SetStore::in_dir(temp.path()).load_all().is_empty());
}

#[test]
fn test_corrupt_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());
    fs::write(store.path(), "{not json").unwrap();

    assert!(store.load_all().is_empty());
}

#[test]
fn test_non_array_file_is_empty() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());
    fs::write(store.path(), r#"{"id": 1, "name": "lonely"}"#).unwrap();

    assert!(store.load_all().is_empty());
}

#[test]
fn test_malformed_entries_are_skipped() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());
    fs::write(
        store.path(),
        r#"[{"id": 1, "name": "good", "abilities": [], "powerLevel": 4}, {"name": 7}]"#,
    )
    .unwrap();

    let sets = store.load_all();
    assert_eq!(sets.len(), 1);
    assert_eq!(sets[0].name, "good");
}

#[test]
fn test_save_then_load_preserves_abilities_and_power() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());
    let abilities = vec![ability("Gale Lance"), ability("Storm Veil")];

    let saved = store.add("  Windwalker kit ", &abilities, PowerLevel::clamped(8));
    assert_eq!(saved.name, "Windwalker kit");

    let loaded = store.get(saved.id).unwrap();
    assert_eq!(loaded.abilities, abilities);
    assert_eq!(loaded.power_level.get(), 8);
}

#[test]
fn test_ids_are_unique_within_one_millisecond() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());

    let a = store.add("a", &[], PowerLevel::default());
    let b = store.add("b", &[], PowerLevel::default());
    let c = store.add("c", &[], PowerLevel::default());

    assert!(a.id < b.id && b.id < c.id);
    assert_eq!(store.load_all().len(), 3);
}

#[test]
fn test_delete_removes_from_listing() {
    let temp = TempDir::new().unwrap();
    let store = SetStore::in_dir(temp.path());
    let keep = store.add("keep", &[ability("Magma Fist")], PowerLevel::default());
    let drop = store.add("drop", &[ability("Ice Age")], PowerLevel::default());

    assert!(store.delete(drop.id));
    assert!(!store.delete(drop.id));

    let names: Vec<_> = store.load_all().into_iter().map(|s| s.name).collect();
    assert_eq!(names, vec!["keep"]);
    assert!(store.get(keep.id).is_some());
    assert!(store.get(drop.id).is_none());
}

#[test]
fn test_save_failure_is_swallowed() {
    let temp = TempDir::new().unwrap();
    let blocker = temp.path().join("not-a-dir");
    fs::write(&blocker, "file").unwrap();

    let store = SetStore::in_dir(&blocker);
    let set = store.add("ghost", &[ability("Phantom Step")], PowerLevel::default());

    assert_eq!(set.name, "ghost");
    assert!(store.load_all().is_empty());
}

#[test]
fn test_next_id_prefers_clock_then_bumps() {
    let existing = vec![AbilitySet {
        id: 500,
        name: "x".into(),
        abilities: Vec::new(),
        power_level: PowerLevel::default(),
    }];

    assert_eq!(next_id(&existing, 1_000), 1_000);
    assert_eq!(next_id(&existing, 500), 501);
    assert_eq!(next_id(&existing, -5), 501);
    assert_eq!(next_id(&[], 42), 42);
}
