//! Unit tests for the unlockable catalog.

use std::sync::Arc;

use fitquest::storage::Database;
use fitquest::unlocks::{
    ItemType, UnlockError, UnlockableCatalog, UserProgress, DEFAULT_BACKGROUND, STARTER_BADGE,
};

fn catalog() -> UnlockableCatalog {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let catalog = UnlockableCatalog::new(db);
    catalog.initialize_defaults().unwrap();
    catalog
}

fn progress(points: u32, achievements: &[&str]) -> UserProgress {
    UserProgress::new(points, achievements.iter().map(|s| s.to_string()).collect())
}

#[test]
fn test_defaults_seeded_once() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let catalog = UnlockableCatalog::new(db);

    catalog.initialize_defaults().unwrap();
    let count = catalog.list(None).unwrap().len();

    // Re-seeding leaves existing rows alone
    catalog.initialize_defaults().unwrap();
    assert_eq!(catalog.list(None).unwrap().len(), count);
}

#[test]
fn test_list_filters_by_type() {
    let catalog = catalog();

    let backgrounds = catalog.list(Some(ItemType::Background)).unwrap();
    assert!(!backgrounds.is_empty());
    assert!(backgrounds
        .iter()
        .all(|i| i.kind.item_type() == ItemType::Background));

    let all = catalog.list(None).unwrap();
    assert!(all.len() > backgrounds.len());
}

#[test]
fn test_starter_items_unlocked_from_first_listing() {
    let catalog = catalog();

    let bg = catalog.get(DEFAULT_BACKGROUND, ItemType::Background).unwrap();
    assert!(bg.unlocked);

    let badge = catalog.get(STARTER_BADGE, ItemType::Badge).unwrap();
    assert!(badge.unlocked);
}

#[test]
fn test_unlock_unknown_item() {
    let catalog = catalog();

    let err = catalog
        .unlock("no-such-item", ItemType::Gear, &progress(99_999, &[]))
        .unwrap_err();

    assert!(matches!(err, UnlockError::ItemNotFound { .. }));
}

#[test]
fn test_lookup_requires_matching_type() {
    let catalog = catalog();

    // Exists as a background, not as gear
    let err = catalog
        .unlock(DEFAULT_BACKGROUND, ItemType::Gear, &progress(0, &[]))
        .unwrap_err();

    assert!(matches!(err, UnlockError::ItemNotFound { .. }));
}

#[test]
fn test_unlock_requires_points() {
    let catalog = catalog();

    let err = catalog
        .unlock("pro-headband", ItemType::Gear, &progress(499, &[]))
        .unwrap_err();
    assert!(matches!(err, UnlockError::RequirementsNotMet(_)));

    let item = catalog
        .unlock("pro-headband", ItemType::Gear, &progress(500, &[]))
        .unwrap();
    assert!(item.unlocked);
}

#[test]
fn test_unlock_requires_achievements() {
    let catalog = catalog();

    // Points alone are not enough for running-shoes
    let err = catalog
        .unlock("running-shoes", ItemType::Gear, &progress(1000, &[]))
        .unwrap_err();
    assert!(matches!(err, UnlockError::RequirementsNotMet(_)));

    let item = catalog
        .unlock(
            "running-shoes",
            ItemType::Gear,
            &progress(1000, &["first-steps"]),
        )
        .unwrap();
    assert!(item.unlocked);
}

#[test]
fn test_unlock_is_monotonic() {
    let catalog = catalog();
    let rich = progress(1_000_000, &[]);

    catalog
        .unlock("tank-top", ItemType::Gear, &rich)
        .unwrap();

    // Every further unlock fails, and the flag stays set
    for _ in 0..3 {
        let err = catalog.unlock("tank-top", ItemType::Gear, &rich).unwrap_err();
        assert!(matches!(err, UnlockError::AlreadyUnlocked(_)));
        assert!(catalog.get("tank-top", ItemType::Gear).unwrap().unlocked);
    }
}

#[test]
fn test_unlock_already_unlocked_starter() {
    let catalog = catalog();

    let err = catalog
        .unlock(STARTER_BADGE, ItemType::Badge, &progress(0, &[]))
        .unwrap_err();
    assert!(matches!(err, UnlockError::AlreadyUnlocked(_)));
}

#[test]
fn test_unlock_state_shared_across_handles() {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let first = UnlockableCatalog::new(Arc::clone(&db));
    first.initialize_defaults().unwrap();

    first
        .unlock("dedicated", ItemType::Badge, &progress(1000, &[]))
        .unwrap();

    let second = UnlockableCatalog::new(db);
    assert!(second.get("dedicated", ItemType::Badge).unwrap().unlocked);
}
