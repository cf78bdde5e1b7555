//! Repository for the `breeds` table.

use catfacts_core::types::DbId;
use sqlx::SqlitePool;

use super::NOW_SQL;
use crate::models::breed::{Breed, CreateBreed, UpdateBreed};

const COLUMNS: &str = "id, name, origin, description, created_at, updated_at";

/// Provides CRUD operations for breeds.
pub struct BreedRepo;

impl BreedRepo {
    /// Insert a new breed, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateBreed) -> Result<Breed, sqlx::Error> {
        let query = format!(
            "INSERT INTO breeds (name, origin, description)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(&input.name)
            .bind(&input.origin)
            .bind(&input.description)
            .bind(input.origin.is_some())
            .bind(input.description.is_some())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds WHERE id = $1");
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Find a breed by exact name. Used by seeding to link cats to breeds.
    pub async fn find_by_name(pool: &SqlitePool, name: &str) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds WHERE name = $1 ORDER BY id LIMIT 1");
        sqlx::query_as::<_, Breed>(&query)
            .bind(name)
            .fetch_optional(pool)
            .await
    }

    /// List all breeds ordered by name.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Breed>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM breeds ORDER BY name ASC, id ASC");
        sqlx::query_as::<_, Breed>(&query).fetch_all(pool).await
    }

    /// Update a breed. `name` is applied when given; `origin` and
    /// `description` only when set, where a set `None` clears the column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateBreed,
    ) -> Result<Option<Breed>, sqlx::Error> {
        let query = format!(
            "UPDATE breeds SET
                name = COALESCE($2, name),
                origin = CASE WHEN $5 THEN $3 ELSE origin END,
                description = CASE WHEN $6 THEN $4 ELSE description END,
                updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Breed>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.origin.as_set().cloned().flatten())
            .bind(input.description.as_set().cloned().flatten())
            .bind(input.origin.is_set())
            .bind(input.description.is_set())
            .fetch_optional(pool)
            .await
    }

    /// Delete a breed. Cats of this breed keep existing with no breed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM breeds WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM breeds")
            .fetch_one(pool)
            .await
    }
}
