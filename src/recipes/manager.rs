//! Recipe storage and search.

use chrono::{DateTime, Utc};
use rusqlite::{params, OptionalExtension};
use std::sync::Arc;
use thiserror::Error;
use uuid::Uuid;

use super::types::{MealType, Recipe};
use crate::storage::Database;

/// Manager for shared recipes.
pub struct RecipeManager {
    db: Arc<Database>,
}

impl RecipeManager {
    /// Create a new recipe manager.
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Add a recipe.
    pub fn create(
        &self,
        title: String,
        meal_type: MealType,
        ingredients: Vec<String>,
        shared_by: Option<Uuid>,
    ) -> Result<Recipe, RecipeError> {
        let recipe = Recipe {
            id: Uuid::new_v4(),
            title,
            meal_type,
            ingredients,
            instructions: None,
            prep_minutes: None,
            calories: None,
            shared_by,
            created_at: Utc::now(),
        };

        let conn = self.db.connection();
        conn.execute(
            "INSERT INTO recipes
             (id, title, meal_type, ingredients_json, instructions, prep_minutes, calories, shared_by, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)",
            params![
                recipe.id.to_string(),
                recipe.title,
                recipe.meal_type.as_str(),
                serde_json::to_string(&recipe.ingredients)?,
                recipe.instructions,
                recipe.prep_minutes,
                recipe.calories,
                recipe.shared_by.map(|id| id.to_string()),
                recipe.created_at.to_rfc3339(),
            ],
        )?;

        Ok(recipe)
    }

    /// Get a recipe by id.
    pub fn get(&self, id: Uuid) -> Result<Recipe, RecipeError> {
        let conn = self.db.connection();

        let row = conn
            .query_row(
                "SELECT id, title, meal_type, ingredients_json, instructions, prep_minutes, calories, shared_by, created_at
                 FROM recipes WHERE id = ?1",
                [id.to_string()],
                recipe_row,
            )
            .optional()?;

        match row {
            Some(row) => recipe_from_row(row),
            None => Err(RecipeError::NotFound(id)),
        }
    }

    /// All recipes in creation order.
    pub fn all(&self) -> Result<Vec<Recipe>, RecipeError> {
        let conn = self.db.connection();

        let mut stmt = conn.prepare(
            "SELECT id, title, meal_type, ingredients_json, instructions, prep_minutes, calories, shared_by, created_at
             FROM recipes ORDER BY rowid",
        )?;

        let rows = stmt.query_map([], recipe_row)?;

        let mut recipes = Vec::new();
        for row in rows {
            recipes.push(recipe_from_row(row?)?);
        }

        Ok(recipes)
    }

    /// Recipes for a meal slot.
    pub fn by_meal_type(&self, meal_type: MealType) -> Result<Vec<Recipe>, RecipeError> {
        Ok(self
            .all()?
            .into_iter()
            .filter(|r| r.meal_type == meal_type)
            .collect())
    }

    /// Case-insensitive search over titles and ingredients.
    pub fn search(&self, query: &str) -> Result<Vec<Recipe>, RecipeError> {
        let needle = query.to_lowercase();

        Ok(self
            .all()?
            .into_iter()
            .filter(|r| {
                r.title.to_lowercase().contains(&needle)
                    || r.ingredients
                        .iter()
                        .any(|i| i.to_lowercase().contains(&needle))
            })
            .collect())
    }

    /// Delete a recipe.
    pub fn delete(&self, id: Uuid) -> Result<(), RecipeError> {
        let conn = self.db.connection();

        let affected = conn.execute("DELETE FROM recipes WHERE id = ?1", [id.to_string()])?;

        if affected == 0 {
            return Err(RecipeError::NotFound(id));
        }

        Ok(())
    }
}

type RecipeRow = (
    String,
    String,
    String,
    String,
    Option<String>,
    Option<u32>,
    Option<u32>,
    Option<String>,
    String,
);

fn recipe_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RecipeRow> {
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

fn recipe_from_row(row: RecipeRow) -> Result<Recipe, RecipeError> {
    let (id, title, meal_type, ingredients, instructions, prep_minutes, calories, shared_by, created_at) =
        row;

    Ok(Recipe {
        id: Uuid::parse_str(&id)
            .map_err(|_| RecipeError::CorruptRecord(format!("bad uuid: {id}")))?,
        title,
        meal_type: MealType::from_str(&meal_type)
            .ok_or_else(|| RecipeError::CorruptRecord(format!("bad meal type: {meal_type}")))?,
        ingredients: serde_json::from_str(&ingredients)?,
        instructions,
        prep_minutes,
        calories,
        shared_by: shared_by
            .map(|s| {
                Uuid::parse_str(&s)
                    .map_err(|_| RecipeError::CorruptRecord(format!("bad uuid: {s}")))
            })
            .transpose()?,
        created_at: DateTime::parse_from_rfc3339(&created_at)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(|_| RecipeError::CorruptRecord(format!("bad timestamp: {created_at}")))?,
    })
}

/// Recipe errors.
#[derive(Debug, Error)]
pub enum RecipeError {
    #[error("Recipe not found: {0}")]
    NotFound(Uuid),

    #[error("Corrupt record: {0}")]
    CorruptRecord(String),

    #[error("Database error: {0}")]
    DatabaseError(#[from] rusqlite::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}
