//! Unlockable cosmetics: requirements, catalog, and default item set.

pub mod catalog;
pub mod defaults;
pub mod evaluator;
pub mod types;

pub use catalog::{UnlockableCatalog, UnlockError};
pub use defaults::{default_items, DEFAULT_BACKGROUND, STARTER_BADGE};
pub use types::{GearSlot, ItemKind, ItemType, Requirements, UnlockableItem, UserProgress};
