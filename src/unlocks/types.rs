//! Core types for the unlockable cosmetics system.
//!
//! Defines item kinds, requirement sets, and user progress.

use serde::{Deserialize, Serialize};

/// Coarse item type, used for catalog filtering and lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ItemType {
    /// Wearable gear, one slot each
    Gear,
    /// Scene backdrop behind the avatar
    Background,
    /// Badge shown next to the avatar
    Badge,
}

impl ItemType {
    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Gear => "gear",
            ItemType::Background => "background",
            ItemType::Badge => "badge",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "gear" => Some(ItemType::Gear),
            "background" => Some(ItemType::Background),
            "badge" => Some(ItemType::Badge),
            _ => None,
        }
    }
}

impl std::fmt::Display for ItemType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Gear slot on the avatar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GearSlot {
    Helmet,
    Shirt,
    Pants,
    Shoes,
    Accessory,
}

impl GearSlot {
    /// All slots in display order.
    pub const ALL: [GearSlot; 5] = [
        GearSlot::Helmet,
        GearSlot::Shirt,
        GearSlot::Pants,
        GearSlot::Shoes,
        GearSlot::Accessory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            GearSlot::Helmet => "helmet",
            GearSlot::Shirt => "shirt",
            GearSlot::Pants => "pants",
            GearSlot::Shoes => "shoes",
            GearSlot::Accessory => "accessory",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "helmet" => Some(GearSlot::Helmet),
            "shirt" => Some(GearSlot::Shirt),
            "pants" => Some(GearSlot::Pants),
            "shoes" => Some(GearSlot::Shoes),
            "accessory" => Some(GearSlot::Accessory),
            _ => None,
        }
    }
}

impl std::fmt::Display for GearSlot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Item kind with per-variant data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ItemKind {
    /// Gear occupies one avatar slot
    Gear { slot: GearSlot },
    Background,
    Badge,
}

impl ItemKind {
    /// The coarse type of this kind.
    pub fn item_type(&self) -> ItemType {
        match self {
            ItemKind::Gear { .. } => ItemType::Gear,
            ItemKind::Background => ItemType::Background,
            ItemKind::Badge => ItemType::Badge,
        }
    }
}

/// Requirement set gating an unlock.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Requirements {
    /// Points threshold; 0 means no points gate
    pub points: u32,
    /// Achievement ids that must all be earned
    pub achievements: Vec<String>,
}

impl Requirements {
    /// A requirement set with only a points threshold.
    pub fn points(points: u32) -> Self {
        Self {
            points,
            achievements: Vec::new(),
        }
    }

    /// A free item with no gate at all.
    pub fn none() -> Self {
        Self::default()
    }

    /// Require an additional achievement.
    pub fn with_achievement(mut self, achievement: &str) -> Self {
        self.achievements.push(achievement.to_string());
        self
    }

    /// Whether this set gates nothing.
    pub fn is_empty(&self) -> bool {
        self.points == 0 && self.achievements.is_empty()
    }
}

/// A user's cumulative progress: points plus earned achievements.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct UserProgress {
    /// Cumulative points
    pub points: u32,
    /// Earned achievement ids, no duplicates
    pub achievements: Vec<String>,
}

impl UserProgress {
    pub fn new(points: u32, achievements: Vec<String>) -> Self {
        Self {
            points,
            achievements,
        }
    }

    pub fn has_achievement(&self, id: &str) -> bool {
        self.achievements.iter().any(|a| a == id)
    }
}

/// A cosmetic catalog entry gated by a requirement set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UnlockableItem {
    /// Stable string id, also used in avatar slots (e.g. "red-helmet")
    pub id: String,
    /// Display name
    pub name: String,
    /// Description shown in the customization screen
    pub description: Option<String>,
    /// Kind with per-variant data
    pub kind: ItemKind,
    /// Unlock gate
    pub requirements: Requirements,
    /// Whether the item has been unlocked. One-way: never reverts.
    pub unlocked: bool,
}

impl UnlockableItem {
    fn new(id: &str, name: &str, kind: ItemKind, requirements: Requirements) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            description: None,
            kind,
            requirements,
            unlocked: false,
        }
    }

    /// Create a gear item for the given slot.
    pub fn gear(id: &str, name: &str, slot: GearSlot, requirements: Requirements) -> Self {
        Self::new(id, name, ItemKind::Gear { slot }, requirements)
    }

    /// Create a background item.
    pub fn background(id: &str, name: &str, requirements: Requirements) -> Self {
        Self::new(id, name, ItemKind::Background, requirements)
    }

    /// Create a badge item.
    pub fn badge(id: &str, name: &str, requirements: Requirements) -> Self {
        Self::new(id, name, ItemKind::Badge, requirements)
    }

    /// Set the description.
    pub fn with_description(mut self, description: &str) -> Self {
        self.description = Some(description.to_string());
        self
    }

    /// Mark as a starter item, unlocked from the first listing.
    pub fn starter(mut self) -> Self {
        self.unlocked = true;
        self
    }

    /// Gear slot for gear items, `None` otherwise.
    pub fn gear_slot(&self) -> Option<GearSlot> {
        match self.kind {
            ItemKind::Gear { slot } => Some(slot),
            _ => None,
        }
    }
}
