//! Points calculation from a single day's logged activity.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Steps needed per point earned.
pub const STEPS_PER_POINT: u32 = 1000;

/// Flat bonus for logging a weigh-in.
pub const WEIGHT_LOG_BONUS: u32 = 10;

/// Points per glass of water.
pub const POINTS_PER_GLASS: u32 = 5;

/// Maximum trackable glasses of water per day.
pub const MAX_WATER_GLASSES: u8 = 15;

/// Raw activity input for one calendar day.
///
/// `None` means the field was not logged; `Some(0)` steps is a logged value.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ActivityInput {
    /// Steps walked
    pub steps: Option<u32>,
    /// Body weight in pounds
    pub weight_lbs: Option<f64>,
    /// Glasses of water, 0..=15
    pub water_glasses: u8,
}

impl ActivityInput {
    /// Whether any activity field was logged at all.
    pub fn has_activity(&self) -> bool {
        self.steps.is_some() || self.weight_lbs.is_some() || self.water_glasses > 0
    }
}

/// Compute total points for a day's activity.
///
/// 1 point per 1,000 steps, a 10-point bonus for logging weight, and
/// 5 points per glass of water. Returns 0 when nothing was logged;
/// whether an all-empty submission is accepted is the caller's policy.
pub fn calculate_points(input: &ActivityInput) -> Result<u32, PointsError> {
    if input.water_glasses > MAX_WATER_GLASSES {
        return Err(PointsError::WaterOutOfRange(input.water_glasses));
    }

    if let Some(weight) = input.weight_lbs {
        if !weight.is_finite() || weight <= 0.0 {
            return Err(PointsError::InvalidWeight(weight));
        }
    }

    let mut points = 0;

    if let Some(steps) = input.steps {
        points += steps / STEPS_PER_POINT;
    }

    if input.weight_lbs.is_some() {
        points += WEIGHT_LOG_BONUS;
    }

    points += u32::from(input.water_glasses) * POINTS_PER_GLASS;

    Ok(points)
}

/// Points calculation errors.
#[derive(Debug, Clone, Copy, PartialEq, Error)]
pub enum PointsError {
    #[error("Water glasses must be between 0 and 15, got {0}")]
    WaterOutOfRange(u8),

    #[error("Weight must be a positive number, got {0}")]
    InvalidWeight(f64),
}
