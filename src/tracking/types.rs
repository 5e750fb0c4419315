//! Daily activity log types.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Days of lookback for the weekly window (7 calendar-day slots).
pub const WEEKLY_LOOKBACK_DAYS: i64 = 6;

/// Days of lookback for the monthly window (30 calendar-day slots).
pub const MONTHLY_LOOKBACK_DAYS: i64 = 29;

/// One day's logged activity for a user.
///
/// At most one log exists per (user, date); re-submitting a date updates
/// the existing entry in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyLog {
    pub id: Uuid,
    pub user_id: Uuid,
    /// Calendar day the activity belongs to
    pub date: NaiveDate,
    /// Steps walked, if logged
    pub steps: Option<u32>,
    /// Body weight in pounds, if logged
    pub weight_lbs: Option<f64>,
    /// Glasses of water, 0..=15
    pub water_glasses: u8,
    /// Points earned for this day, derived at write time
    pub points: u32,
    pub created_at: DateTime<Utc>,
}
