//! Repository for the `cats` table.

use catfacts_core::types::DbId;
use sqlx::SqlitePool;

use super::NOW_SQL;
use crate::models::cat::{Cat, CatWithBreed, CreateCat, UpdateCat};

const COLUMNS: &str = "id, name, breed_id, age, created_at, updated_at";

/// Provides CRUD operations for cats.
pub struct CatRepo;

impl CatRepo {
    /// Insert a new cat, returning the created row.
    pub async fn create(pool: &SqlitePool, input: &CreateCat) -> Result<Cat, sqlx::Error> {
        let query = format!(
            "INSERT INTO cats (name, breed_id, age)
             VALUES ($1, $2, $3)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(&input.name)
            .bind(input.breed_id)
            .bind(input.age)
            .bind(input.breed_id.is_some())
            .bind(input.age.is_some())
            .fetch_one(pool)
            .await
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM cats WHERE id = $1");
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all cats with their breed's name and description.
    ///
    /// Cats without a breed (or whose breed was deleted) are included with
    /// `NULL` breed fields.
    pub async fn list_with_breed(pool: &SqlitePool) -> Result<Vec<CatWithBreed>, sqlx::Error> {
        sqlx::query_as::<_, CatWithBreed>(
            "SELECT c.id, c.name, c.breed_id, c.age,
                    b.name AS breed_name, b.description AS breed_description,
                    c.created_at, c.updated_at
             FROM cats c
             LEFT JOIN breeds b ON b.id = c.breed_id
             ORDER BY c.id ASC",
        )
        .fetch_all(pool)
        .await
    }

    /// Update a cat. `name` is applied when given; `breed_id` and `age`
    /// only when set, where a set `None` clears the column.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateCat,
    ) -> Result<Option<Cat>, sqlx::Error> {
        let query = format!(
            "UPDATE cats SET
                name = COALESCE($2, name),
                breed_id = CASE WHEN $5 THEN $3 ELSE breed_id END,
                age = CASE WHEN $6 THEN $4 ELSE age END,
                updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Cat>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(input.breed_id.as_set().copied().flatten())
            .bind(input.age.as_set().copied().flatten())
            .bind(input.breed_id.is_set())
            .bind(input.age.is_set())
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM cats WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM cats")
            .fetch_one(pool)
            .await
    }
}
