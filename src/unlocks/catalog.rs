//! Unlockable item catalog.
//!
//! Owns the unlocked flag: items flip from locked to unlocked exactly once,
//! through [`UnlockableCatalog::unlock`], and never revert.

use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use thiserror::Error;

use super::defaults::default_items;
use super::evaluator;
use super::types::{GearSlot, ItemKind, ItemType, Requirements, UnlockableItem, UserProgress};
use crate::storage::Database;

/// Catalog of unlockable cosmetic items.
pub struct UnlockableCatalog {
    db: Arc<Database>,
}

impl UnlockableCatalog {
    /// Create a new catalog over the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert the default item set if not already present.
    ///
    /// Existing rows are left untouched, so unlock state survives restarts.
    pub fn initialize_defaults(&self) -> Result<(), UnlockError> {
        let conn = self.db.connection();

        for item in default_items() {
            conn.execute(
                "INSERT OR IGNORE INTO unlockable_items
                 (id, name, description, item_type, gear_slot, req_points, req_achievements_json, unlocked)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                params![
                    item.id,
                    item.name,
                    item.description,
                    item.kind.item_type().as_str(),
                    item.gear_slot().map(|s| s.as_str()),
                    item.requirements.points,
                    serde_json::to_string(&item.requirements.achievements)?,
                    item.unlocked,
                ],
            )?;
        }

        Ok(())
    }

    /// List items, optionally filtered by type, with current unlocked state.
    pub fn list(&self, item_type: Option<ItemType>) -> Result<Vec<UnlockableItem>, UnlockError> {
        let conn = self.db.connection();

        let mut rows = Vec::new();
        match item_type {
            Some(filter) => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, item_type, gear_slot, req_points, req_achievements_json, unlocked
                     FROM unlockable_items WHERE item_type = ?1 ORDER BY rowid",
                )?;
                let mapped = stmt.query_map([filter.as_str()], item_row)?;
                for row in mapped {
                    rows.push(row?);
                }
            }
            None => {
                let mut stmt = conn.prepare(
                    "SELECT id, name, description, item_type, gear_slot, req_points, req_achievements_json, unlocked
                     FROM unlockable_items ORDER BY rowid",
                )?;
                let mapped = stmt.query_map([], item_row)?;
                for row in mapped {
                    rows.push(row?);
                }
            }
        }

        rows.into_iter().map(item_from_row).collect()
    }

    /// Look up an item by id and type.
    pub fn get(&self, item_id: &str, item_type: ItemType) -> Result<UnlockableItem, UnlockError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, name, description, item_type, gear_slot, req_points, req_achievements_json, unlocked
                 FROM unlockable_items WHERE id = ?1 AND item_type = ?2",
                params![item_id, item_type.as_str()],
                item_row,
            )
            .optional()?;

        match row {
            Some(row) => item_from_row(row),
            None => Err(UnlockError::ItemNotFound {
                item_type,
                id: item_id.to_string(),
            }),
        }
    }

    /// Unlock an item if the user's progress satisfies its requirements.
    ///
    /// The unlocked flag is monotonic: a second unlock of the same item
    /// fails with [`UnlockError::AlreadyUnlocked`].
    pub fn unlock(
        &self,
        item_id: &str,
        item_type: ItemType,
        progress: &UserProgress,
    ) -> Result<UnlockableItem, UnlockError> {
        let mut item = self.get(item_id, item_type)?;

        if item.unlocked {
            return Err(UnlockError::AlreadyUnlocked(item.id));
        }

        if !evaluator::meets(&item.requirements, progress) {
            return Err(UnlockError::RequirementsNotMet(item.id));
        }

        let conn = self.db.connection();
        conn.execute(
            "UPDATE unlockable_items SET unlocked = 1 WHERE id = ?1",
            [item_id],
        )?;

        item.unlocked = true;
        tracing::info!(item = %item.id, "item unlocked");

        Ok(item)
    }
}

type ItemRow = (
    String,
    String,
    Option<String>,
    String,
    Option<String>,
    u32,
    String,
    bool,
);

fn item_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ItemRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn item_from_row(row: ItemRow) -> Result<UnlockableItem, UnlockError> {
    let (id, name, description, type_str, slot_str, req_points, req_achievements, unlocked) = row;

    let item_type = ItemType::from_str(&type_str)
        .ok_or_else(|| UnlockError::InvalidItemType(type_str.clone()))?;

    let kind = match item_type {
        ItemType::Gear => {
            let slot = slot_str
                .as_deref()
                .and_then(GearSlot::from_str)
                .ok_or_else(|| UnlockError::InvalidItemType(format!("gear item {id} has no slot")))?;
            ItemKind::Gear { slot }
        }
        ItemType::Background => ItemKind::Background,
        ItemType::Badge => ItemKind::Badge,
    };

    Ok(UnlockableItem {
        id,
        name,
        description,
        kind,
        requirements: Requirements {
            points: req_points,
            achievements: serde_json::from_str(&req_achievements)?,
        },
        unlocked,
    })
}

/// Unlock operation errors.
#[derive(Debug, Error)]
pub enum UnlockError {
    #[error("{item_type} item not found: {id}")]
    ItemNotFound { item_type: ItemType, id: String },

    #[error("Item already unlocked: {0}")]
    AlreadyUnlocked(String),

    #[error("Requirements not met for item: {0}")]
    RequirementsNotMet(String),

    #[error("Invalid item type: {0}")]
    InvalidItemType(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
