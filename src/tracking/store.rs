//! Daily log storage.
//!
//! Upsert-by-(user, date) semantics: a second submission for the same
//! calendar day replaces the logged fields and recomputes points, keeping
//! the original row id and creation timestamp.

use chrono::{DateTime, Duration, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::types::{DailyLog, MONTHLY_LOOKBACK_DAYS, WEEKLY_LOOKBACK_DAYS};
use crate::points::{calculate_points, ActivityInput, PointsError};
use crate::storage::Database;

/// Store for daily activity logs.
pub struct DailyLogStore {
    db: Arc<Database>,
}

impl DailyLogStore {
    /// Create a new store over the given database.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert or update the log for (user, date).
    ///
    /// Rejects a submission with nothing logged at all. Points are computed
    /// here; callers never supply them.
    pub fn upsert(
        &self,
        user_id: Uuid,
        date: NaiveDate,
        input: &ActivityInput,
    ) -> Result<DailyLog, TrackingError> {
        if !input.has_activity() {
            return Err(TrackingError::EmptyLog);
        }

        let points = calculate_points(input)?;
        let conn = self.db.connection();

        let existing: Option<(String, String)> = conn
            .query_row(
                "SELECT id, created_at FROM daily_logs WHERE user_id = ?1 AND date = ?2",
                params![user_id.to_string(), date.to_string()],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let log = match existing {
            Some((id_str, created_at_str)) => {
                conn.execute(
                    "UPDATE daily_logs
                     SET steps = ?1, weight_lbs = ?2, water_glasses = ?3, points = ?4
                     WHERE id = ?5",
                    params![
                        input.steps,
                        input.weight_lbs,
                        input.water_glasses,
                        points,
                        id_str,
                    ],
                )?;

                DailyLog {
                    id: parse_uuid(&id_str)?,
                    user_id,
                    date,
                    steps: input.steps,
                    weight_lbs: input.weight_lbs,
                    water_glasses: input.water_glasses,
                    points,
                    created_at: parse_timestamp(&created_at_str)?,
                }
            }
            None => {
                let log = DailyLog {
                    id: Uuid::new_v4(),
                    user_id,
                    date,
                    steps: input.steps,
                    weight_lbs: input.weight_lbs,
                    water_glasses: input.water_glasses,
                    points,
                    created_at: Utc::now(),
                };

                conn.execute(
                    "INSERT INTO daily_logs
                     (id, user_id, date, steps, weight_lbs, water_glasses, points, created_at)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
                    params![
                        log.id.to_string(),
                        log.user_id.to_string(),
                        log.date.to_string(),
                        log.steps,
                        log.weight_lbs,
                        log.water_glasses,
                        log.points,
                        log.created_at.to_rfc3339(),
                    ],
                )?;

                log
            }
        };

        tracing::debug!(user = %user_id, date = %date, points, "daily log saved");

        Ok(log)
    }

    /// Get a log by id.
    pub fn get(&self, id: Uuid) -> Result<DailyLog, TrackingError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, user_id, date, steps, weight_lbs, water_glasses, points, created_at
                 FROM daily_logs WHERE id = ?1",
                [id.to_string()],
                log_row,
            )
            .optional()?;

        match row {
            Some(row) => log_from_row(row),
            None => Err(TrackingError::NotFound(id)),
        }
    }

    /// Get the log for a specific date, if one exists.
    ///
    /// Absence is a valid empty state, not an error.
    pub fn log_for_date(
        &self,
        user_id: Uuid,
        date: NaiveDate,
    ) -> Result<Option<DailyLog>, TrackingError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, user_id, date, steps, weight_lbs, water_glasses, points, created_at
                 FROM daily_logs WHERE user_id = ?1 AND date = ?2",
                params![user_id.to_string(), date.to_string()],
                log_row,
            )
            .optional()?;

        row.map(log_from_row).transpose()
    }

    /// All logs with `from <= date <= to`, ordered by date ascending.
    pub fn window(
        &self,
        user_id: Uuid,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyLog>, TrackingError> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, user_id, date, steps, weight_lbs, water_glasses, points, created_at
             FROM daily_logs
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date ASC",
        )?;

        let rows = stmt.query_map(
            params![user_id.to_string(), from.to_string(), to.to_string()],
            log_row,
        )?;

        let mut logs = Vec::new();
        for row in rows {
            logs.push(log_from_row(row?)?);
        }

        Ok(logs)
    }

    /// Logs for the 7-day window ending today.
    pub fn weekly(&self, user_id: Uuid, today: NaiveDate) -> Result<Vec<DailyLog>, TrackingError> {
        self.window(user_id, today - Duration::days(WEEKLY_LOOKBACK_DAYS), today)
    }

    /// Logs for the 30-day window ending today.
    pub fn monthly(&self, user_id: Uuid, today: NaiveDate) -> Result<Vec<DailyLog>, TrackingError> {
        self.window(user_id, today - Duration::days(MONTHLY_LOOKBACK_DAYS), today)
    }

    /// Delete a log by id.
    pub fn delete(&self, id: Uuid) -> Result<(), TrackingError> {
        let conn = self.db.connection();

        let affected = conn.execute("DELETE FROM daily_logs WHERE id = ?1", [id.to_string()])?;

        if affected == 0 {
            return Err(TrackingError::NotFound(id));
        }

        Ok(())
    }

    /// Sum of points over every stored log for a user.
    pub fn total_points(&self, user_id: Uuid) -> Result<u32, TrackingError> {
        let conn = self.db.connection();

        let total: u32 = conn.query_row(
            "SELECT COALESCE(SUM(points), 0) FROM daily_logs WHERE user_id = ?1",
            [user_id.to_string()],
            |row| row.get(0),
        )?;

        Ok(total)
    }
}

type LogRow = (
    String,
    String,
    String,
    Option<u32>,
    Option<f64>,
    u8,
    u32,
    String,
);

fn log_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<LogRow> {
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

fn log_from_row(row: LogRow) -> Result<DailyLog, TrackingError> {
    let (id, user_id, date, steps, weight_lbs, water_glasses, points, created_at) = row;

    Ok(DailyLog {
        id: parse_uuid(&id)?,
        user_id: parse_uuid(&user_id)?,
        date: date
            .parse()
            .map_err(|_| TrackingError::CorruptRecord(format!("bad date: {date}")))?,
        steps,
        weight_lbs,
        water_glasses,
        points,
        created_at: parse_timestamp(&created_at)?,
    })
}

fn parse_uuid(s: &str) -> Result<Uuid, TrackingError> {
    Uuid::parse_str(s).map_err(|_| TrackingError::CorruptRecord(format!("bad uuid: {s}")))
}

fn parse_timestamp(s: &str) -> Result<DateTime<Utc>, TrackingError> {
    DateTime::parse_from_rfc3339(s)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|_| TrackingError::CorruptRecord(format!("bad timestamp: {s}")))
}

/// Daily log errors.
#[derive(Debug, Error)]
pub enum TrackingError {
    #[error("Nothing logged: provide steps, weight, or water")]
    EmptyLog,

    #[error("Daily log not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    InvalidInput(#[from] PointsError),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),
}
