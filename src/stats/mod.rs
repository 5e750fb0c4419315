//! User statistics derived from stored logs.
//!
//! Everything here is computed from the daily log history and roster
//! records. Nothing is randomized; the same stored data always yields the
//! same summaries.

use chrono::{Duration, NaiveDate};
use std::collections::HashSet;
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::storage::Database;
use crate::team::{TeamError, TeamManager};
use crate::tracking::{DailyLog, DailyLogStore, TrackingError, WEEKLY_LOOKBACK_DAYS};
use crate::unlocks::UserProgress;

/// One calendar-day slot in a series; zero-filled when nothing was logged.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct DaySummary {
    pub date: NaiveDate,
    pub steps: u32,
    pub water_glasses: u8,
    pub points: u32,
    /// Whether a log exists for this day
    pub logged: bool,
}

/// Snapshot of today's standing.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TodaySummary {
    pub date: NaiveDate,
    pub log: Option<DailyLog>,
    /// Cumulative points over all stored logs
    pub total_points: u32,
    /// Consecutive logged days ending today (or yesterday if today is empty)
    pub streak: u32,
}

/// Totals over the 30-day window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct MonthlySummary {
    pub total_steps: u64,
    /// Mean steps per day over the 30 slots, rounded to nearest
    pub avg_daily_steps: u32,
    pub total_points: u32,
    /// Longest consecutive run of logged days in the window
    pub best_streak: u32,
}

/// Statistics service.
pub struct StatsService {
    logs: DailyLogStore,
    team: TeamManager,
}

impl StatsService {
    /// Create a new stats service.
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            logs: DailyLogStore::new(Arc::clone(&db)),
            team: TeamManager::new(db),
        }
    }

    /// A user's progress: cumulative points plus earned achievements.
    ///
    /// Points and achievements come from the roster record when the user is
    /// a known member; otherwise points fall back to the log totals so
    /// progress stays computable from history alone.
    pub fn user_progress(&self, user_id: Uuid) -> Result<UserProgress, StatsError> {
        match self.team.get_member(user_id) {
            Ok(member) => Ok(UserProgress::new(member.points, member.achievements)),
            Err(TeamError::MemberNotFound(_)) => {
                let points = self.logs.total_points(user_id)?;
                Ok(UserProgress::new(points, Vec::new()))
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Today's snapshot.
    pub fn today(&self, user_id: Uuid, today: NaiveDate) -> Result<TodaySummary, StatsError> {
        let log = self.logs.log_for_date(user_id, today)?;
        let total_points = self.logs.total_points(user_id)?;

        let monthly = self.logs.monthly(user_id, today)?;
        let logged: HashSet<NaiveDate> = monthly.iter().map(|l| l.date).collect();
        let streak = current_streak(&logged, today);

        Ok(TodaySummary {
            date: today,
            log,
            total_points,
            streak,
        })
    }

    /// The 7-day series ending today, one slot per calendar day.
    pub fn weekly_series(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<Vec<DaySummary>, StatsError> {
        let logs = self.logs.weekly(user_id, today)?;

        let start = today - Duration::days(WEEKLY_LOOKBACK_DAYS);
        let mut series = Vec::with_capacity(7);

        for offset in 0..=WEEKLY_LOOKBACK_DAYS {
            let date = start + Duration::days(offset);
            let slot = match logs.iter().find(|l| l.date == date) {
                Some(log) => DaySummary {
                    date,
                    steps: log.steps.unwrap_or(0),
                    water_glasses: log.water_glasses,
                    points: log.points,
                    logged: true,
                },
                None => DaySummary {
                    date,
                    steps: 0,
                    water_glasses: 0,
                    points: 0,
                    logged: false,
                },
            };
            series.push(slot);
        }

        Ok(series)
    }

    /// Totals over the 30-day window ending today.
    pub fn monthly_summary(
        &self,
        user_id: Uuid,
        today: NaiveDate,
    ) -> Result<MonthlySummary, StatsError> {
        let logs = self.logs.monthly(user_id, today)?;

        let total_steps: u64 = logs.iter().map(|l| u64::from(l.steps.unwrap_or(0))).sum();
        let total_points: u32 = logs.iter().map(|l| l.points).sum();

        let days = 30u32;
        let avg_daily_steps = (total_steps as f64 / f64::from(days)).round() as u32;

        let logged: HashSet<NaiveDate> = logs.iter().map(|l| l.date).collect();

        Ok(MonthlySummary {
            total_steps,
            avg_daily_steps,
            total_points,
            best_streak: best_streak(&logged),
        })
    }
}

/// Consecutive logged days ending at `today`.
///
/// An empty today does not break the streak until tomorrow: counting then
/// starts from yesterday.
pub fn current_streak(logged: &HashSet<NaiveDate>, today: NaiveDate) -> u32 {
    let start = if logged.contains(&today) {
        today
    } else {
        today - Duration::days(1)
    };

    let mut streak = 0;
    let mut day = start;
    while logged.contains(&day) {
        streak += 1;
        day = day - Duration::days(1);
    }

    streak
}

/// Longest consecutive run among the logged days.
pub fn best_streak(logged: &HashSet<NaiveDate>) -> u32 {
    let mut best = 0;

    for &day in logged {
        // Only count runs from their first day
        if logged.contains(&(day - Duration::days(1))) {
            continue;
        }

        let mut len = 0;
        let mut cursor = day;
        while logged.contains(&cursor) {
            len += 1;
            cursor = cursor + Duration::days(1);
        }

        best = best.max(len);
    }

    best
}

/// Statistics errors.
#[derive(Debug, Error)]
pub enum StatsError {
    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Team(#[from] TeamError),
}
