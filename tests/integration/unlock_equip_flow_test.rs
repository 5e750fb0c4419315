//! Unlock-then-equip flow through the application facade.

use chrono::NaiveDate;

use fitquest::avatar::UnequipTarget;
use fitquest::points::ActivityInput;
use fitquest::storage::Database;
use fitquest::unlocks::{GearSlot, ItemType, UnlockError, DEFAULT_BACKGROUND};
use fitquest::{AppError, FitQuestApp};

fn app() -> FitQuestApp {
    let db = Database::open_in_memory().unwrap();
    FitQuestApp::new(db, "Player").unwrap()
}

fn d(s: &str) -> NaiveDate {
    s.parse().unwrap()
}

/// Log enough water-heavy days to accumulate at least `target` points.
fn grind_points(app: &FitQuestApp, target: u32) {
    let mut date = d("2024-01-01");
    let mut total = 0;
    while total < target {
        app.log_activity(
            date,
            &ActivityInput {
                steps: Some(20_000),
                weight_lbs: Some(170.0),
                water_glasses: 15,
            },
        )
        .unwrap();
        total += 105; // 20 + 10 + 75 per day
        date = date.succ_opt().unwrap();
    }
}

#[test]
fn test_unlock_gated_until_points_earned() {
    let app = app();

    // 500-point helmet is out of reach at zero points
    let err = app.unlock_item("pro-headband", ItemType::Gear).unwrap_err();
    assert!(matches!(
        err,
        AppError::Unlock(UnlockError::RequirementsNotMet(_))
    ));

    grind_points(&app, 500);

    let item = app.unlock_item("pro-headband", ItemType::Gear).unwrap();
    assert!(item.unlocked);

    // A prior unlock observed by a later equip in the same session
    let avatar = app.equip_item("pro-headband", ItemType::Gear).unwrap();
    assert_eq!(avatar.gear.slot(GearSlot::Helmet), Some("pro-headband"));
}

#[test]
fn test_equip_locked_item_rejected_and_state_unchanged() {
    let app = app();

    let before = app.avatar().unwrap();

    let err = app.equip_item("mountain-peak", ItemType::Background).unwrap_err();
    assert!(matches!(
        err,
        AppError::Avatar(fitquest::avatar::AvatarError::ItemNotUnlocked(_))
    ));

    assert_eq!(app.avatar().unwrap(), before);
}

#[test]
fn test_unlock_twice_rejected() {
    let app = app();
    grind_points(&app, 300);

    app.unlock_item("outdoor-park", ItemType::Background).unwrap();

    let err = app.unlock_item("outdoor-park", ItemType::Background).unwrap_err();
    assert!(matches!(
        err,
        AppError::Unlock(UnlockError::AlreadyUnlocked(_))
    ));
}

#[test]
fn test_unknown_item_rejected() {
    let app = app();

    let err = app.unlock_item("hover-boots", ItemType::Gear).unwrap_err();
    assert!(matches!(
        err,
        AppError::Unlock(UnlockError::ItemNotFound { .. })
    ));
}

#[test]
fn test_background_swap_and_reset() {
    let app = app();
    grind_points(&app, 300);

    app.unlock_item("outdoor-park", ItemType::Background).unwrap();
    let avatar = app.equip_item("outdoor-park", ItemType::Background).unwrap();
    assert_eq!(avatar.background, "outdoor-park");

    let avatar = app.unequip_item(UnequipTarget::Background).unwrap();
    assert_eq!(avatar.background, DEFAULT_BACKGROUND);
}

#[test]
fn test_starter_items_equip_without_grinding() {
    let app = app();

    let avatar = app.equip_item("basic-cap", ItemType::Gear).unwrap();
    assert_eq!(avatar.gear.slot(GearSlot::Helmet), Some("basic-cap"));

    let avatar = app.unequip_item(UnequipTarget::Gear(GearSlot::Helmet)).unwrap();
    assert!(avatar.gear.slot(GearSlot::Helmet).is_none());
}

#[test]
fn test_achievement_gated_unlock() {
    let app = app();
    grind_points(&app, 1000);

    // Enough points, but the achievement matters too: grinding awarded
    // first-steps along the way, so running-shoes opens up.
    let progress = app.user_progress().unwrap();
    assert!(progress.has_achievement("first-steps"));

    let item = app.unlock_item("running-shoes", ItemType::Gear).unwrap();
    assert!(item.unlocked);
}

#[test]
fn test_catalog_listing_reflects_unlocks() {
    let app = app();
    grind_points(&app, 300);

    let before = app.unlockables(Some(ItemType::Background)).unwrap();
    let park_before = before.iter().find(|i| i.id == "outdoor-park").unwrap();
    assert!(!park_before.unlocked);

    app.unlock_item("outdoor-park", ItemType::Background).unwrap();

    let after = app.unlockables(Some(ItemType::Background)).unwrap();
    let park_after = after.iter().find(|i| i.id == "outdoor-park").unwrap();
    assert!(park_after.unlocked);
}
