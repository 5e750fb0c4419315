//! Application facade.
//!
//! Owns the database and every manager, and exposes the query and command
//! surface the presentation layer talks to. Cross-cutting flows live here:
//! logging activity keeps roster points, streaks, and achievements in sync;
//! unlocking consults the user's current progress.

use chrono::{NaiveDate, Utc};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use crate::avatar::{Avatar, AvatarError, AvatarManager, ColorUpdate, UnequipTarget};
use crate::challenges::{Challenge, ChallengeError, ChallengeManager, ChallengePhase};
use crate::points::ActivityInput;
use crate::recipes::{RecipeError, RecipeManager};
use crate::stats::{MonthlySummary, StatsError, StatsService, TodaySummary};
use crate::storage::{Database, DatabaseError};
use crate::team::{
    rank, team_stats, LeaderboardEntry, TeamComposition, TeamError, TeamManager, TeamMember,
    TeamRole, TeamStats,
};
use crate::tracking::{DailyLog, DailyLogStore, TrackingError};
use crate::unlocks::{ItemType, UnlockableCatalog, UnlockableItem, UnlockError, UserProgress};

// Achievement ids awarded by the progression engine.
const ACH_FIRST_STEPS: &str = "first-steps";
const ACH_STEP_CHAMPION: &str = "step-champion";
const ACH_HYDRATION_MASTER: &str = "hydration-master";
const ACH_TEAM_PLAYER: &str = "team-player";
const ACH_ELITE_ATHLETE: &str = "elite-athlete";

/// Steps in one day for the step-champion achievement.
const STEP_CHAMPION_THRESHOLD: u32 = 10_000;
/// Glasses in one day for the hydration-master achievement.
const HYDRATION_THRESHOLD: u8 = 8;
/// Streak length for the elite-athlete achievement.
const ELITE_STREAK_THRESHOLD: u32 = 30;

/// The FitQuest application core.
pub struct FitQuestApp {
    logs: DailyLogStore,
    catalog: UnlockableCatalog,
    avatars: AvatarManager,
    team: TeamManager,
    challenges: ChallengeManager,
    recipes: RecipeManager,
    stats: StatsService,
    current_user: Uuid,
}

impl FitQuestApp {
    /// Open the app over a database, ensuring the catalog is seeded and the
    /// named user exists on the roster.
    pub fn new(db: Database, display_name: &str) -> Result<Self, AppError> {
        let db = Arc::new(db);

        let catalog = UnlockableCatalog::new(Arc::clone(&db));
        catalog.initialize_defaults()?;

        let team = TeamManager::new(Arc::clone(&db));
        let current_user = match team
            .members()?
            .into_iter()
            .find(|m| m.name == display_name)
        {
            Some(member) => member.id,
            None => team.add_member(display_name)?.id,
        };

        Ok(Self {
            logs: DailyLogStore::new(Arc::clone(&db)),
            catalog,
            avatars: AvatarManager::new(Arc::clone(&db)),
            team,
            challenges: ChallengeManager::new(Arc::clone(&db)),
            recipes: RecipeManager::new(Arc::clone(&db)),
            stats: StatsService::new(db),
            current_user,
        })
    }

    /// The current user's roster id.
    pub fn current_user(&self) -> Uuid {
        self.current_user
    }

    // --- Queries ---

    /// The current user's avatar.
    pub fn avatar(&self) -> Result<Avatar, AppError> {
        Ok(self.avatars.get_or_create(self.current_user)?)
    }

    /// Catalog items, optionally filtered by type.
    pub fn unlockables(&self, item_type: Option<ItemType>) -> Result<Vec<UnlockableItem>, AppError> {
        Ok(self.catalog.list(item_type)?)
    }

    /// The current user's points and achievements.
    pub fn user_progress(&self) -> Result<UserProgress, AppError> {
        Ok(self.stats.user_progress(self.current_user)?)
    }

    /// The log for a given date, if any.
    pub fn log_for_date(&self, date: NaiveDate) -> Result<Option<DailyLog>, AppError> {
        Ok(self.logs.log_for_date(self.current_user, date)?)
    }

    /// Logs over the 7-day window ending today.
    pub fn weekly_logs(&self, today: NaiveDate) -> Result<Vec<DailyLog>, AppError> {
        Ok(self.logs.weekly(self.current_user, today)?)
    }

    /// Logs over the 30-day window ending today.
    pub fn monthly_logs(&self, today: NaiveDate) -> Result<Vec<DailyLog>, AppError> {
        Ok(self.logs.monthly(self.current_user, today)?)
    }

    /// Today's snapshot for the dashboard.
    pub fn today_summary(&self, today: NaiveDate) -> Result<TodaySummary, AppError> {
        Ok(self.stats.today(self.current_user, today)?)
    }

    /// The 7-slot daily series for the weekly chart.
    pub fn weekly_series(&self, today: NaiveDate) -> Result<Vec<crate::stats::DaySummary>, AppError> {
        Ok(self.stats.weekly_series(self.current_user, today)?)
    }

    /// Monthly totals.
    pub fn monthly_summary(&self, today: NaiveDate) -> Result<MonthlySummary, AppError> {
        Ok(self.stats.monthly_summary(self.current_user, today)?)
    }

    /// Standings sorted by points.
    pub fn leaderboard(&self) -> Result<Vec<LeaderboardEntry>, AppError> {
        Ok(rank(&self.team.members()?))
    }

    /// Aggregate team stats.
    pub fn team_stats(&self) -> Result<TeamStats, AppError> {
        Ok(team_stats(&self.team.members()?))
    }

    /// Each recognized role and its current holder.
    pub fn role_holders(&self) -> Result<Vec<(TeamRole, Option<TeamMember>)>, AppError> {
        let members = self.team.members()?;

        Ok(TeamRole::ALL
            .into_iter()
            .map(|role| {
                let holder = members.iter().find(|m| m.role == Some(role)).cloned();
                (role, holder)
            })
            .collect())
    }

    /// Roles no member currently holds.
    pub fn available_roles(&self) -> Result<Vec<TeamRole>, AppError> {
        Ok(self.team.available_roles()?)
    }

    /// Challenges in a lifecycle phase as of today.
    pub fn challenges_in_phase(
        &self,
        phase: ChallengePhase,
        today: NaiveDate,
    ) -> Result<Vec<Challenge>, AppError> {
        Ok(self.challenges.in_phase(phase, today)?)
    }

    /// Direct access to the team manager.
    pub fn team(&self) -> &TeamManager {
        &self.team
    }

    /// Direct access to the challenge manager.
    pub fn challenges(&self) -> &ChallengeManager {
        &self.challenges
    }

    /// Direct access to the recipe manager.
    pub fn recipes(&self) -> &RecipeManager {
        &self.recipes
    }

    // --- Commands ---

    /// Log activity for a date, then bring roster points, streak, and
    /// achievements up to date.
    pub fn log_activity(&self, date: NaiveDate, input: &ActivityInput) -> Result<DailyLog, AppError> {
        let log = self.logs.upsert(self.current_user, date, input)?;

        let total = self.logs.total_points(self.current_user)?;
        self.team.set_points(self.current_user, total)?;

        let summary = self.stats.today(self.current_user, date)?;
        self.team
            .touch_activity(self.current_user, summary.streak, Utc::now())?;

        self.award_activity_achievements(&log, summary.streak)?;

        Ok(log)
    }

    /// Unlock a catalog item against the current user's progress.
    pub fn unlock_item(
        &self,
        item_id: &str,
        item_type: ItemType,
    ) -> Result<UnlockableItem, AppError> {
        let progress = self.stats.user_progress(self.current_user)?;
        Ok(self.catalog.unlock(item_id, item_type, &progress)?)
    }

    /// Equip an item on the current user's avatar.
    pub fn equip_item(&self, item_id: &str, item_type: ItemType) -> Result<Avatar, AppError> {
        let item = self.catalog.get(item_id, item_type)?;
        Ok(self.avatars.equip(self.current_user, &item)?)
    }

    /// Clear an avatar slot.
    pub fn unequip_item(&self, target: UnequipTarget) -> Result<Avatar, AppError> {
        Ok(self.avatars.unequip(self.current_user, target)?)
    }

    /// Update avatar colors.
    pub fn set_avatar_colors(&self, update: &ColorUpdate) -> Result<Avatar, AppError> {
        Ok(self.avatars.update_colors(self.current_user, update)?)
    }

    /// Assign a role by id string (the recognized set only).
    pub fn assign_role(&self, member_id: Uuid, role_id: &str) -> Result<TeamMember, AppError> {
        Ok(self.team.assign_role(member_id, role_id)?)
    }

    /// Validate full team formation.
    pub fn form_team(&self) -> Result<TeamComposition, AppError> {
        Ok(self.team.form_team()?)
    }

    /// Join a challenge as the current user.
    pub fn join_challenge(&self, challenge_id: Uuid) -> Result<Challenge, AppError> {
        let challenge = self.challenges.join(challenge_id, self.current_user)?;

        self.team
            .record_achievement(self.current_user, ACH_TEAM_PLAYER)?;

        Ok(challenge)
    }

    fn award_activity_achievements(&self, log: &DailyLog, streak: u32) -> Result<(), AppError> {
        let user = self.current_user;

        if log.steps.unwrap_or(0) > 0 {
            self.team.record_achievement(user, ACH_FIRST_STEPS)?;
        }

        if log.steps.unwrap_or(0) >= STEP_CHAMPION_THRESHOLD {
            self.team.record_achievement(user, ACH_STEP_CHAMPION)?;
        }

        if log.water_glasses >= HYDRATION_THRESHOLD {
            self.team.record_achievement(user, ACH_HYDRATION_MASTER)?;
        }

        if streak >= ELITE_STREAK_THRESHOLD {
            self.team.record_achievement(user, ACH_ELITE_ATHLETE)?;
        }

        Ok(())
    }
}

/// Unified application error: every domain failure, discriminated.
#[derive(Debug, Error)]
pub enum AppError {
    #[error(transparent)]
    Tracking(#[from] TrackingError),

    #[error(transparent)]
    Unlock(#[from] UnlockError),

    #[error(transparent)]
    Avatar(#[from] AvatarError),

    #[error(transparent)]
    Team(#[from] TeamError),

    #[error(transparent)]
    Challenge(#[from] ChallengeError),

    #[error(transparent)]
    Recipe(#[from] RecipeError),

    #[error(transparent)]
    Stats(#[from] StatsError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
