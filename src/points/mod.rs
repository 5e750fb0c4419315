//! Points and progression engine.

pub mod calculator;

pub use calculator::{
    calculate_points, ActivityInput, PointsError, MAX_WATER_GLASSES, POINTS_PER_GLASS,
    STEPS_PER_POINT, WEIGHT_LOG_BONUS,
};
