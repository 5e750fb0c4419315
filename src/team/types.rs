//! Core types for team features.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Team responsibility tag. Each role has at most one holder at a time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TeamRole {
    /// Keeps the team pumped
    Motivator,
    /// Posts recipes for the team
    RecipeSharer,
    /// Runs the daily check-in
    CheckInLeader,
}

impl TeamRole {
    /// The fixed recognized role set.
    pub const ALL: [TeamRole; 3] = [
        TeamRole::Motivator,
        TeamRole::RecipeSharer,
        TeamRole::CheckInLeader,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TeamRole::Motivator => "motivator",
            TeamRole::RecipeSharer => "recipe-sharer",
            TeamRole::CheckInLeader => "check-in-leader",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "motivator" => Some(TeamRole::Motivator),
            "recipe-sharer" => Some(TeamRole::RecipeSharer),
            "check-in-leader" => Some(TeamRole::CheckInLeader),
            _ => None,
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            TeamRole::Motivator => "Motivator",
            TeamRole::RecipeSharer => "Recipe Sharer",
            TeamRole::CheckInLeader => "Check-in Leader",
        }
    }
}

impl std::fmt::Display for TeamRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A member of the user's team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamMember {
    pub id: Uuid,
    pub name: String,
    /// Cumulative points
    pub points: u32,
    /// Earned achievement ids, no duplicates
    pub achievements: Vec<String>,
    /// Held role, if any
    pub role: Option<TeamRole>,
    /// Consecutive days with logged activity
    pub streak: u32,
    pub last_active: Option<DateTime<Utc>>,
    pub joined_at: DateTime<Utc>,
}

impl TeamMember {
    /// Create a new member with zeroed progress.
    pub fn new(name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            points: 0,
            achievements: Vec::new(),
            role: None,
            streak: 0,
            last_active: None,
            joined_at: Utc::now(),
        }
    }
}

/// Snapshot of a fully formed team: every role held.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamComposition {
    pub motivator: TeamMember,
    pub recipe_sharer: TeamMember,
    pub check_in_leader: TeamMember,
}

impl TeamComposition {
    /// Holder of the given role.
    pub fn holder(&self, role: TeamRole) -> &TeamMember {
        match role {
            TeamRole::Motivator => &self.motivator,
            TeamRole::RecipeSharer => &self.recipe_sharer,
            TeamRole::CheckInLeader => &self.check_in_leader,
        }
    }
}

/// Aggregate team statistics.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamStats {
    pub total_members: u32,
    pub total_points: u64,
    /// Mean points per member, rounded to nearest
    pub avg_points: u32,
}
