//! Leaderboard rankings.
//!
//! Pure derivation of sorted standings from member point totals.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::types::{TeamMember, TeamRole, TeamStats};

/// One leaderboard row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaderboardEntry {
    /// 1-based position
    pub rank: u32,
    pub member_id: Uuid,
    pub name: String,
    pub points: u32,
    pub role: Option<TeamRole>,
    pub streak: u32,
}

/// Rank members by points, descending.
///
/// The sort is stable: members with equal points keep their input order,
/// so standings are deterministic.
pub fn rank(members: &[TeamMember]) -> Vec<LeaderboardEntry> {
    let mut sorted: Vec<&TeamMember> = members.iter().collect();
    sorted.sort_by(|a, b| b.points.cmp(&a.points));

    sorted
        .into_iter()
        .enumerate()
        .map(|(i, member)| LeaderboardEntry {
            rank: i as u32 + 1,
            member_id: member.id,
            name: member.name.clone(),
            points: member.points,
            role: member.role,
            streak: member.streak,
        })
        .collect()
}

/// Aggregate stats over the roster.
pub fn team_stats(members: &[TeamMember]) -> TeamStats {
    let total_members = members.len() as u32;
    let total_points: u64 = members.iter().map(|m| u64::from(m.points)).sum();

    let avg_points = if total_members == 0 {
        0
    } else {
        (total_points as f64 / f64::from(total_members)).round() as u32
    };

    TeamStats {
        total_members,
        total_points,
        avg_points,
    }
}
