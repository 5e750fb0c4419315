//! Avatar state types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::unlocks::{GearSlot, ItemKind, UnlockableItem, DEFAULT_BACKGROUND, STARTER_BADGE};

/// Default primary color (hex).
pub const DEFAULT_PRIMARY_COLOR: &str = "#3B82F6";

/// Equipped gear, one optional item id per slot.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct GearLoadout {
    pub helmet: Option<String>,
    pub shirt: Option<String>,
    pub pants: Option<String>,
    pub shoes: Option<String>,
    pub accessory: Option<String>,
}

impl GearLoadout {
    /// Item equipped in the given slot.
    pub fn slot(&self, slot: GearSlot) -> Option<&str> {
        match slot {
            GearSlot::Helmet => self.helmet.as_deref(),
            GearSlot::Shirt => self.shirt.as_deref(),
            GearSlot::Pants => self.pants.as_deref(),
            GearSlot::Shoes => self.shoes.as_deref(),
            GearSlot::Accessory => self.accessory.as_deref(),
        }
    }

    fn slot_mut(&mut self, slot: GearSlot) -> &mut Option<String> {
        match slot {
            GearSlot::Helmet => &mut self.helmet,
            GearSlot::Shirt => &mut self.shirt,
            GearSlot::Pants => &mut self.pants,
            GearSlot::Shoes => &mut self.shoes,
            GearSlot::Accessory => &mut self.accessory,
        }
    }
}

/// Avatar color customization.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AvatarColors {
    /// Primary color as a hex string
    pub primary: String,
    /// Optional secondary color
    #[serde(default)]
    pub secondary: Option<String>,
}

impl Default for AvatarColors {
    fn default() -> Self {
        Self {
            primary: DEFAULT_PRIMARY_COLOR.to_string(),
            secondary: None,
        }
    }
}

/// Partial color update; `Some` replaces the field, `None` keeps it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ColorUpdate {
    pub primary: Option<String>,
    pub secondary: Option<String>,
}

/// What to clear when unequipping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnequipTarget {
    /// Empty the given gear slot
    Gear(GearSlot),
    /// Reset the background to the default (a background is never empty)
    Background,
    /// Remove the badge
    Badge,
}

/// Per-user avatar: equipped cosmetics plus colors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Avatar {
    pub user_id: Uuid,
    pub gear: GearLoadout,
    /// Background item id; defaults to [`DEFAULT_BACKGROUND`]
    pub background: String,
    /// Badge item id, if one is worn
    pub badge: Option<String>,
    pub colors: AvatarColors,
    pub updated_at: DateTime<Utc>,
}

impl Avatar {
    /// A fresh avatar wearing the starter badge in the default gym.
    pub fn new(user_id: Uuid) -> Self {
        Self {
            user_id,
            gear: GearLoadout::default(),
            background: DEFAULT_BACKGROUND.to_string(),
            badge: Some(STARTER_BADGE.to_string()),
            colors: AvatarColors::default(),
            updated_at: Utc::now(),
        }
    }

    /// Equip an unlocked item into its slot.
    ///
    /// Gear replaces whatever occupies its slot; background and badge
    /// replace the single current value. Fails without touching the avatar
    /// if the item is still locked.
    pub fn equip(&mut self, item: &UnlockableItem) -> Result<(), AvatarError> {
        if !item.unlocked {
            return Err(AvatarError::ItemNotUnlocked(item.id.clone()));
        }

        match item.kind {
            ItemKind::Gear { slot } => {
                *self.gear.slot_mut(slot) = Some(item.id.clone());
            }
            ItemKind::Background => {
                self.background = item.id.clone();
            }
            ItemKind::Badge => {
                self.badge = Some(item.id.clone());
            }
        }

        self.updated_at = Utc::now();
        Ok(())
    }

    /// Clear a slot.
    pub fn unequip(&mut self, target: UnequipTarget) {
        match target {
            UnequipTarget::Gear(slot) => {
                *self.gear.slot_mut(slot) = None;
            }
            UnequipTarget::Background => {
                self.background = DEFAULT_BACKGROUND.to_string();
            }
            UnequipTarget::Badge => {
                self.badge = None;
            }
        }

        self.updated_at = Utc::now();
    }

    /// Apply a partial color update.
    pub fn apply_colors(&mut self, update: &ColorUpdate) {
        if let Some(primary) = &update.primary {
            self.colors.primary = primary.clone();
        }
        if let Some(secondary) = &update.secondary {
            self.colors.secondary = Some(secondary.clone());
        }

        self.updated_at = Utc::now();
    }
}

/// Avatar state errors.
#[derive(Debug, Error)]
pub enum AvatarError {
    #[error("Item not unlocked: {0}")]
    ItemNotUnlocked(String),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
