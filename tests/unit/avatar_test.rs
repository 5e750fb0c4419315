//! Unit tests for avatar state and persistence.

use std::sync::Arc;
use uuid::Uuid;

use fitquest::avatar::{AvatarError, AvatarManager, ColorUpdate, UnequipTarget};
use fitquest::storage::Database;
use fitquest::unlocks::{
    GearSlot, ItemType, UnlockableCatalog, UserProgress, DEFAULT_BACKGROUND, STARTER_BADGE,
};

struct Fixture {
    catalog: UnlockableCatalog,
    avatars: AvatarManager,
}

fn fixture() -> Fixture {
    let db = Arc::new(Database::open_in_memory().unwrap());
    let catalog = UnlockableCatalog::new(Arc::clone(&db));
    catalog.initialize_defaults().unwrap();
    Fixture {
        catalog,
        avatars: AvatarManager::new(db),
    }
}

#[test]
fn test_default_avatar_on_first_access() {
    let f = fixture();
    let user = Uuid::new_v4();

    let avatar = f.avatars.get_or_create(user).unwrap();

    assert_eq!(avatar.background, DEFAULT_BACKGROUND);
    assert_eq!(avatar.badge.as_deref(), Some(STARTER_BADGE));
    assert!(avatar.gear.slot(GearSlot::Helmet).is_none());
}

#[test]
fn test_equip_starter_gear_persists() {
    let f = fixture();
    let user = Uuid::new_v4();

    let cap = f.catalog.get("basic-cap", ItemType::Gear).unwrap();
    f.avatars.equip(user, &cap).unwrap();

    let reloaded = f.avatars.get_or_create(user).unwrap();
    assert_eq!(reloaded.gear.slot(GearSlot::Helmet), Some("basic-cap"));
}

#[test]
fn test_equip_locked_item_fails_and_preserves_state() {
    let f = fixture();
    let user = Uuid::new_v4();

    let before = f.avatars.get_or_create(user).unwrap();

    let locked = f.catalog.get("pro-headband", ItemType::Gear).unwrap();
    assert!(!locked.unlocked);

    let err = f.avatars.equip(user, &locked).unwrap_err();
    assert!(matches!(err, AvatarError::ItemNotUnlocked(_)));

    let after = f.avatars.get_or_create(user).unwrap();
    assert_eq!(after, before);
}

#[test]
fn test_equip_after_unlock_succeeds() {
    let f = fixture();
    let user = Uuid::new_v4();

    f.catalog
        .unlock(
            "pro-headband",
            ItemType::Gear,
            &UserProgress::new(500, vec![]),
        )
        .unwrap();

    let item = f.catalog.get("pro-headband", ItemType::Gear).unwrap();
    let avatar = f.avatars.equip(user, &item).unwrap();

    assert_eq!(avatar.gear.slot(GearSlot::Helmet), Some("pro-headband"));
}

#[test]
fn test_equip_occupied_slot_replaces() {
    let f = fixture();
    let user = Uuid::new_v4();

    let sneakers = f.catalog.get("basic-sneakers", ItemType::Gear).unwrap();
    f.avatars.equip(user, &sneakers).unwrap();

    f.catalog
        .unlock(
            "cross-trainers",
            ItemType::Gear,
            &UserProgress::new(2000, vec![]),
        )
        .unwrap();
    let trainers = f.catalog.get("cross-trainers", ItemType::Gear).unwrap();
    let avatar = f.avatars.equip(user, &trainers).unwrap();

    assert_eq!(avatar.gear.slot(GearSlot::Shoes), Some("cross-trainers"));
}

#[test]
fn test_unequip_gear_slot() {
    let f = fixture();
    let user = Uuid::new_v4();

    let shirt = f.catalog.get("basic-tshirt", ItemType::Gear).unwrap();
    f.avatars.equip(user, &shirt).unwrap();

    let avatar = f
        .avatars
        .unequip(user, UnequipTarget::Gear(GearSlot::Shirt))
        .unwrap();
    assert!(avatar.gear.slot(GearSlot::Shirt).is_none());
}

#[test]
fn test_unequip_background_never_empty() {
    let f = fixture();
    let user = Uuid::new_v4();

    f.catalog
        .unlock(
            "outdoor-park",
            ItemType::Background,
            &UserProgress::new(300, vec![]),
        )
        .unwrap();
    let park = f.catalog.get("outdoor-park", ItemType::Background).unwrap();
    f.avatars.equip(user, &park).unwrap();

    let avatar = f.avatars.unequip(user, UnequipTarget::Background).unwrap();
    assert_eq!(avatar.background, DEFAULT_BACKGROUND);
}

#[test]
fn test_unequip_badge_clears_slot() {
    let f = fixture();
    let user = Uuid::new_v4();

    let avatar = f.avatars.unequip(user, UnequipTarget::Badge).unwrap();
    assert!(avatar.badge.is_none());

    let reloaded = f.avatars.get_or_create(user).unwrap();
    assert!(reloaded.badge.is_none());
}

#[test]
fn test_color_update_persists() {
    let f = fixture();
    let user = Uuid::new_v4();

    f.avatars
        .update_colors(
            user,
            &ColorUpdate {
                primary: Some("#10B981".to_string()),
                secondary: Some("#F59E0B".to_string()),
            },
        )
        .unwrap();

    let avatar = f.avatars.get_or_create(user).unwrap();
    assert_eq!(avatar.colors.primary, "#10B981");
    assert_eq!(avatar.colors.secondary.as_deref(), Some("#F59E0B"));
}

#[test]
fn test_avatars_are_per_user() {
    let f = fixture();
    let alice = Uuid::new_v4();
    let bob = Uuid::new_v4();

    let cap = f.catalog.get("basic-cap", ItemType::Gear).unwrap();
    f.avatars.equip(alice, &cap).unwrap();

    let bobs = f.avatars.get_or_create(bob).unwrap();
    assert!(bobs.gear.slot(GearSlot::Helmet).is_none());
}
