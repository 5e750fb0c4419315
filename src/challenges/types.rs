//! Challenge types and lifecycle classification.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Daily thresholds a challenge asks of its participants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChallengeRules {
    /// Step threshold per day
    pub steps: Option<u32>,
    /// Water threshold per day, in glasses
    pub water_glasses: Option<u8>,
    /// Points threshold over the challenge
    pub points: Option<u32>,
}

/// Lifecycle phase, derived from the current date — never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChallengePhase {
    Upcoming,
    Active,
    Completed,
}

impl ChallengePhase {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChallengePhase::Upcoming => "upcoming",
            ChallengePhase::Active => "active",
            ChallengePhase::Completed => "completed",
        }
    }
}

impl std::fmt::Display for ChallengePhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Classify a date range against today. Both boundary days count as active.
pub fn classify_phase(today: NaiveDate, start: NaiveDate, end: NaiveDate) -> ChallengePhase {
    if start > today {
        ChallengePhase::Upcoming
    } else if end < today {
        ChallengePhase::Completed
    } else {
        ChallengePhase::Active
    }
}

/// A team challenge.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Challenge {
    pub id: Uuid,
    pub name: String,
    pub description: Option<String>,
    /// Free-form label, e.g. "Weekly Mini-Challenge"
    pub kind: String,
    pub start_date: NaiveDate,
    /// Inclusive; always >= start_date
    pub end_date: NaiveDate,
    /// Participating user ids, no duplicates
    pub participants: Vec<Uuid>,
    pub rules: ChallengeRules,
    pub created_at: DateTime<Utc>,
}

impl Challenge {
    /// Lifecycle phase as of `today`.
    pub fn phase(&self, today: NaiveDate) -> ChallengePhase {
        classify_phase(today, self.start_date, self.end_date)
    }

    pub fn has_participant(&self, user_id: Uuid) -> bool {
        self.participants.contains(&user_id)
    }
}

/// Typed partial update; `Some` replaces the field, `None` keeps it.
#[derive(Debug, Clone, Default)]
pub struct ChallengeUpdate {
    pub name: Option<String>,
    pub description: Option<String>,
    pub kind: Option<String>,
    pub rules: Option<ChallengeRules>,
}
