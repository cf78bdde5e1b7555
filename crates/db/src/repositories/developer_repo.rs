//! Repository for the `developers` table.

use catfacts_core::types::DbId;
use sqlx::SqlitePool;

use super::NOW_SQL;
use crate::models::developer::{Developer, DeveloperFields};

/// Column list shared across queries to avoid repetition.
const COLUMNS: &str = "id, name, role, github, bio, companion_name, companion_breed, \
                       profile_image, companion_image, created_at, updated_at";

/// Provides CRUD operations for developers.
///
/// The repository stores exactly what it is given. Field merging for
/// partial updates and file bookkeeping happen in the developer service.
pub struct DeveloperRepo;

impl DeveloperRepo {
    /// Insert a new developer, returning the created row with its new id.
    pub async fn create(
        pool: &SqlitePool,
        input: &DeveloperFields,
    ) -> Result<Developer, sqlx::Error> {
        let query = format!(
            "INSERT INTO developers
                (name, role, github, bio, companion_name, companion_breed,
                 profile_image, companion_image)
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Developer>(&query)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.github)
            .bind(&input.bio)
            .bind(&input.companion_name)
            .bind(&input.companion_breed)
            .bind(&input.profile_image)
            .bind(&input.companion_image)
            .fetch_one(pool)
            .await
    }

    /// Find a developer by id.
    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Developer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM developers WHERE id = $1");
        sqlx::query_as::<_, Developer>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all developers in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Developer>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM developers ORDER BY id ASC");
        sqlx::query_as::<_, Developer>(&query).fetch_all(pool).await
    }

    /// Overwrite every writable column of a developer.
    ///
    /// Returns `None` if no row with the given `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &DeveloperFields,
    ) -> Result<Option<Developer>, sqlx::Error> {
        let query = format!(
            "UPDATE developers SET
                name = $2,
                role = $3,
                github = $4,
                bio = $5,
                companion_name = $6,
                companion_breed = $7,
                profile_image = $8,
                companion_image = $9,
                updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Developer>(&query)
            .bind(id)
            .bind(&input.name)
            .bind(&input.role)
            .bind(&input.github)
            .bind(&input.bio)
            .bind(&input.companion_name)
            .bind(&input.companion_breed)
            .bind(&input.profile_image)
            .bind(&input.companion_image)
            .fetch_optional(pool)
            .await
    }

    /// Permanently delete a developer. Returns `true` if a row was removed.
    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM developers WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Total number of developer rows.
    pub async fn count(pool: &SqlitePool) -> Result<i64, sqlx::Error> {
        sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM developers")
            .fetch_one(pool)
            .await
    }
}
