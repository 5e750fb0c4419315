//! Avatar persistence.
//!
//! Single writer for the avatars table; all mutation flows through
//! equip/unequip/color operations so the unlocked-items-only invariant
//! holds for every stored loadout.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use uuid::Uuid;

use super::types::{Avatar, AvatarColors, AvatarError, ColorUpdate, GearLoadout, UnequipTarget};
use crate::storage::Database;
use crate::unlocks::UnlockableItem;

/// Manager for per-user avatar state.
pub struct AvatarManager {
    db: Arc<Database>,
}

impl AvatarManager {
    /// Create a new avatar manager.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Get a user's avatar, creating the default one on first access.
    pub fn get_or_create(&self, user_id: Uuid) -> Result<Avatar, AvatarError> {
        let conn = self.db.connection();

        let row: Option<(String, String, Option<String>, String, String)> = conn
            .query_row(
                "SELECT gear_json, background, badge, colors_json, updated_at
                 FROM avatars WHERE user_id = ?1",
                [user_id.to_string()],
                |row| {
                    Ok((
                        row.get(0)?,
                        row.get(1)?,
                        row.get(2)?,
                        row.get(3)?,
                        row.get(4)?,
                    ))
                },
            )
            .optional()?;

        match row {
            Some((gear_json, background, badge, colors_json, updated_at)) => {
                let gear: GearLoadout = serde_json::from_str(&gear_json)?;
                let colors: AvatarColors = serde_json::from_str(&colors_json)?;

                Ok(Avatar {
                    user_id,
                    gear,
                    background,
                    badge,
                    colors,
                    updated_at: parse_timestamp(&updated_at)?,
                })
            }
            None => {
                let avatar = Avatar::new(user_id);
                self.save(&avatar)?;
                Ok(avatar)
            }
        }
    }

    /// Equip an unlocked item, persisting the new state.
    ///
    /// On failure the stored avatar is unchanged.
    pub fn equip(&self, user_id: Uuid, item: &UnlockableItem) -> Result<Avatar, AvatarError> {
        let mut avatar = self.get_or_create(user_id)?;
        avatar.equip(item)?;
        self.save(&avatar)?;

        tracing::debug!(user = %user_id, item = %item.id, "item equipped");

        Ok(avatar)
    }

    /// Clear a slot, persisting the new state.
    pub fn unequip(&self, user_id: Uuid, target: UnequipTarget) -> Result<Avatar, AvatarError> {
        let mut avatar = self.get_or_create(user_id)?;
        avatar.unequip(target);
        self.save(&avatar)?;

        Ok(avatar)
    }

    /// Apply a partial color update, persisting the new state.
    pub fn update_colors(&self, user_id: Uuid, update: &ColorUpdate) -> Result<Avatar, AvatarError> {
        let mut avatar = self.get_or_create(user_id)?;
        avatar.apply_colors(update);
        self.save(&avatar)?;

        Ok(avatar)
    }

    fn save(&self, avatar: &Avatar) -> Result<(), AvatarError> {
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO avatars (user_id, gear_json, background, badge, colors_json, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(user_id) DO UPDATE SET
                 gear_json = excluded.gear_json,
                 background = excluded.background,
                 badge = excluded.badge,
                 colors_json = excluded.colors_json,
                 updated_at = excluded.updated_at",
            params![
                avatar.user_id.to_string(),
                serde_json::to_string(&avatar.gear)?,
                avatar.background,
                avatar.badge,
                serde_json::to_string(&avatar.colors)?,
                avatar.updated_at.to_rfc3339(),
            ],
        )?;

        Ok(())
    }
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, AvatarError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| AvatarError::CorruptRecord(format!("bad timestamp: {s}")))
}
