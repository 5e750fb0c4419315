//! Challenge management.

use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::types::{Challenge, ChallengePhase, ChallengeRules, ChallengeUpdate};
use crate::storage::Database;

/// Manager for challenges.
pub struct ChallengeManager {
    db: Arc<Database>,
}

impl ChallengeManager {
    /// Create a new challenge manager.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Create a new challenge.
    pub fn create(
        &self,
        name: String,
        description: Option<String>,
        kind: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        rules: ChallengeRules,
    ) -> Result<Challenge, ChallengeError> {
        if end_date < start_date {
            return Err(ChallengeError::ValidationError(format!(
                "end date {end_date} precedes start date {start_date}"
            )));
        }

        let challenge = Challenge {
            id: Uuid::new_v4(),
            name,
            description,
            kind,
            start_date,
            end_date,
            participants: Vec::new(),
            rules,
            created_at: Utc::now(),
        };

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO challenges
             (id, name, description, kind, start_date, end_date, participants_json, rules_json, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                challenge.id.to_string(),
                challenge.name,
                challenge.description,
                challenge.kind,
                challenge.start_date.to_string(),
                challenge.end_date.to_string(),
                serde_json::to_string(&challenge.participants)?,
                serde_json::to_string(&challenge.rules)?,
                challenge.created_at.to_rfc3339(),
            ],
        )?;

        tracing::info!(challenge = %challenge.id, name = %challenge.name, "challenge created");

        Ok(challenge)
    }

    /// Get a challenge by id.
    pub fn get(&self, id: Uuid) -> Result<Challenge, ChallengeError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, name, description, kind, start_date, end_date, participants_json, rules_json, created_at
                 FROM challenges WHERE id = ?1",
                [id.to_string()],
                challenge_row,
            )
            .optional()?;

        match row {
            Some(row) => challenge_from_row(row),
            None => Err(ChallengeError::NotFound(id)),
        }
    }

    /// All challenges in creation order.
    pub fn all(&self) -> Result<Vec<Challenge>, ChallengeError> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, name, description, kind, start_date, end_date, participants_json, rules_json, created_at
             FROM challenges ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], challenge_row)?;

        let mut challenges = Vec::new();
        for row in rows {
            challenges.push(challenge_from_row(row?)?);
        }

        Ok(challenges)
    }

    /// Challenges in the given lifecycle phase as of `today`.
    pub fn in_phase(
        &self,
        phase: ChallengePhase,
        today: NaiveDate,
    ) -> Result<Vec<Challenge>, ChallengeError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|c| c.phase(today) == phase)
            .collect())
    }

    /// Currently active challenges.
    pub fn active(&self, today: NaiveDate) -> Result<Vec<Challenge>, ChallengeError> {
        self.in_phase(ChallengePhase::Active, today)
    }

    /// Join a challenge. Joining twice is rejected.
    pub fn join(&self, challenge_id: Uuid, user_id: Uuid) -> Result<Challenge, ChallengeError> {
        let mut challenge = self.get(challenge_id)?;

        if challenge.has_participant(user_id) {
            return Err(ChallengeError::AlreadyJoined);
        }

        challenge.participants.push(user_id);
        self.save_participants(&challenge)?;

        tracing::info!(challenge = %challenge_id, user = %user_id, "challenge joined");

        Ok(challenge)
    }

    /// Apply a partial update.
    pub fn update(&self, id: Uuid, update: ChallengeUpdate) -> Result<Challenge, ChallengeError> {
        let mut challenge = self.get(id)?;

        if let Some(name) = update.name {
            challenge.name = name;
        }
        if let Some(description) = update.description {
            challenge.description = Some(description);
        }
        if let Some(kind) = update.kind {
            challenge.kind = kind;
        }
        if let Some(rules) = update.rules {
            challenge.rules = rules;
        }

        let conn = self.db.connection();
        conn.execute(
            "UPDATE challenges SET name = ?1, description = ?2, kind = ?3, rules_json = ?4
             WHERE id = ?5",
            params![
                challenge.name,
                challenge.description,
                challenge.kind,
                serde_json::to_string(&challenge.rules)?,
                id.to_string(),
            ],
        )?;

        Ok(challenge)
    }

    /// Delete a challenge.
    pub fn delete(&self, id: Uuid) -> Result<(), ChallengeError> {
        let conn = self.db.connection();

        let affected = conn.execute("DELETE FROM challenges WHERE id = ?1", [id.to_string()])?;

        if affected == 0 {
            return Err(ChallengeError::NotFound(id));
        }

        Ok(())
    }

    fn save_participants(&self, challenge: &Challenge) -> Result<(), ChallengeError> {
        let conn = self.db.connection();

        conn.execute(
            "UPDATE challenges SET participants_json = ?1 WHERE id = ?2",
            params![
                serde_json::to_string(&challenge.participants)?,
                challenge.id.to_string(),
            ],
        )?;

        Ok(())
    }
}

type ChallengeRow = (
    String,
    String,
    Option<String>,
    String,
    String,
    String,
    String,
    String,
    String,
);

fn challenge_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<ChallengeRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
        row.get(8)?,
    ))
}

fn challenge_from_row(row: ChallengeRow) -> Result<Challenge, ChallengeError> {
    let (id, name, description, kind, start_date, end_date, participants, rules, created_at) = row;

    Ok(Challenge {
        id: Uuid::parse_str(&id)
            .map_err(|_| ChallengeError::CorruptRecord(format!("bad uuid: {id}")))?,
        name,
        description,
        kind,
        start_date: start_date
            .parse()
            .map_err(|_| ChallengeError::CorruptRecord(format!("bad date: {start_date}")))?,
        end_date: end_date
            .parse()
            .map_err(|_| ChallengeError::CorruptRecord(format!("bad date: {end_date}")))?,
        participants: serde_json::from_str(&participants)?,
        rules: serde_json::from_str(&rules)?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| ChallengeError::CorruptRecord(format!("bad timestamp: {created_at}")))?,
    })
}

/// Challenge errors.
#[derive(Debug, Error)]
pub enum ChallengeError {
    #[error("Challenge not found: {0}")]
    NotFound(Uuid),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Already joined")]
    AlreadyJoined,

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
