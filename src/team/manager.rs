//! Team roster and role management.
//!
//! Roles are single-holder: assigning a role that is already held clears
//! the previous holder inside the same transaction, so no two members ever
//! hold the same role.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::types::{TeamComposition, TeamMember, TeamRole};
use crate::storage::Database;

/// Manager for the team roster and role assignment.
pub struct TeamManager {
    db: Arc<Database>,
}

impl TeamManager {
    /// Create a new team manager.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Add a member to the roster.
    pub fn add_member(&self, name: &str) -> Result<TeamMember, TeamError> {
        let member = TeamMember::new(name.to_string());
        let conn = self.db.connection();

        conn.execute(
            "INSERT INTO team_members
             (id, name, points, achievements_json, role, streak, last_active, joined_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                member.id.to_string(),
                member.name,
                member.points,
                serde_json::to_string(&member.achievements)?,
                member.role.map(|r| r.as_str()),
                member.streak,
                member.last_active.map(|t| t.to_rfc3339()),
                member.joined_at.to_rfc3339(),
            ],
        )?;

        tracing::info!(member = %member.id, name = %member.name, "member added");

        Ok(member)
    }

    /// Get a member by id.
    pub fn get_member(&self, id: Uuid) -> Result<TeamMember, TeamError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, name, points, achievements_json, role, streak, last_active, joined_at
                 FROM team_members WHERE id = ?1",
                [id.to_string()],
                member_row,
            )
            .optional()?;

        match row {
            Some(row) => member_from_row(row),
            None => Err(TeamError::MemberNotFound(id)),
        }
    }

    /// All members in roster (insertion) order.
    pub fn members(&self) -> Result<Vec<TeamMember>, TeamError> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, name, points, achievements_json, role, streak, last_active, joined_at
             FROM team_members ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], member_row)?;

        let mut members = Vec::new();
        for row in rows {
            members.push(member_from_row(row?)?);
        }

        Ok(members)
    }

    /// Set a member's cumulative points.
    pub fn set_points(&self, id: Uuid, points: u32) -> Result<TeamMember, TeamError> {
        let conn = self.db.connection();

        let affected = conn.execute(
            "UPDATE team_members SET points = ?1 WHERE id = ?2",
            params![points, id.to_string()],
        )?;

        if affected == 0 {
            return Err(TeamError::MemberNotFound(id));
        }

        self.get_member(id)
    }

    /// Record an earned achievement. Adding one the member already has is a
    /// no-op.
    pub fn record_achievement(&self, id: Uuid, achievement: &str) -> Result<TeamMember, TeamError> {
        let mut member = self.get_member(id)?;

        if member.achievements.iter().any(|a| a == achievement) {
            return Ok(member);
        }

        member.achievements.push(achievement.to_string());

        let conn = self.db.connection();
        conn.execute(
            "UPDATE team_members SET achievements_json = ?1 WHERE id = ?2",
            params![
                serde_json::to_string(&member.achievements)?,
                id.to_string()
            ],
        )?;

        tracing::info!(member = %id, achievement, "achievement earned");

        Ok(member)
    }

    /// Update streak and last-active after a day's log.
    pub fn touch_activity(
        &self,
        id: Uuid,
        streak: u32,
        last_active: DateTime<Utc>,
    ) -> Result<(), TeamError> {
        let conn = self.db.connection();

        let affected = conn.execute(
            "UPDATE team_members SET streak = ?1, last_active = ?2 WHERE id = ?3",
            params![streak, last_active.to_rfc3339(), id.to_string()],
        )?;

        if affected == 0 {
            return Err(TeamError::MemberNotFound(id));
        }

        Ok(())
    }

    /// Assign a role to a member.
    ///
    /// The role id must be one of the recognized set; an unknown member is
    /// rejected. If another member currently holds the role it is cleared in
    /// the same transaction, keeping the single-holder invariant with no
    /// observable intermediate state.
    pub fn assign_role(&self, member_id: Uuid, role_id: &str) -> Result<TeamMember, TeamError> {
        let role =
            TeamRole::from_str(role_id).ok_or_else(|| TeamError::InvalidRole(role_id.to_string()))?;

        // Existence check before mutating anything
        self.get_member(member_id)?;

        let conn = self.db.connection();
        let tx = conn.unchecked_transaction()?;

        tx.execute(
            "UPDATE team_members SET role = NULL WHERE role = ?1",
            [role.as_str()],
        )?;
        tx.execute(
            "UPDATE team_members SET role = ?1 WHERE id = ?2",
            params![role.as_str(), member_id.to_string()],
        )?;

        tx.commit()?;

        tracing::info!(member = %member_id, role = %role, "role assigned");

        self.get_member(member_id)
    }

    /// Roles not currently held by any member.
    pub fn available_roles(&self) -> Result<Vec<TeamRole>, TeamError> {
        let members = self.members()?;

        Ok(TeamRole::ALL
            .into_iter()
            .filter(|role| !members.iter().any(|m| m.role == Some(*role)))
            .collect())
    }

    /// Validate that every role is held and return the composition snapshot.
    pub fn form_team(&self) -> Result<TeamComposition, TeamError> {
        let members = self.members()?;

        let holder = |role: TeamRole| {
            members
                .iter()
                .find(|m| m.role == Some(role))
                .cloned()
        };

        let motivator = holder(TeamRole::Motivator);
        let recipe_sharer = holder(TeamRole::RecipeSharer);
        let check_in_leader = holder(TeamRole::CheckInLeader);

        let missing: Vec<TeamRole> = TeamRole::ALL
            .into_iter()
            .zip([&motivator, &recipe_sharer, &check_in_leader])
            .filter(|(_, holder)| holder.is_none())
            .map(|(role, _)| role)
            .collect();

        if !missing.is_empty() {
            return Err(TeamError::IncompleteTeam(missing));
        }

        // All three are present once missing is empty
        Ok(TeamComposition {
            motivator: motivator.ok_or(TeamError::IncompleteTeam(vec![TeamRole::Motivator]))?,
            recipe_sharer: recipe_sharer
                .ok_or(TeamError::IncompleteTeam(vec![TeamRole::RecipeSharer]))?,
            check_in_leader: check_in_leader
                .ok_or(TeamError::IncompleteTeam(vec![TeamRole::CheckInLeader]))?,
        })
    }
}

type MemberRow = (
    String,
    String,
    u32,
    String,
    Option<String>,
    u32,
    Option<String>,
    String,
);

fn member_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<MemberRow> {
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

fn member_from_row(row: MemberRow) -> Result<TeamMember, TeamError> {
    let (id, name, points, achievements_json, role, streak, last_active, joined_at) = row;

    Ok(TeamMember {
        id: Uuid::parse_str(&id)
            .map_err(|_| TeamError::CorruptRecord(format!("bad uuid: {id}")))?,
        name,
        points,
        achievements: serde_json::from_str(&achievements_json)?,
        role: role.as_deref().and_then(TeamRole::from_str),
        streak,
        last_active: last_active.as_deref().map(parse_timestamp).transpose()?,
        joined_at: parse_timestamp(&joined_at)?,
    })
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TeamError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TeamError::CorruptRecord(format!("bad timestamp: {s}")))
}

fn missing_roles_list(roles: &[TeamRole]) -> String {
    roles
        .iter()
        .map(|r| r.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Team management errors.
#[derive(Debug, Error)]
pub enum TeamError {
    #[error("Invalid role: {0}")]
    InvalidRole(String),

    #[error("Team member not found: {0}")]
    MemberNotFound(Uuid),

    #[error("Team incomplete, missing roles: {}", missing_roles_list(.0))]
    IncompleteTeam(Vec<TeamRole>),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
