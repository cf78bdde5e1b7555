//! Repository for the `facts` table.

use catfacts_core::types::DbId;
use sqlx::SqlitePool;

use super::NOW_SQL;
use crate::models::fact::{CreateFact, Fact, UpdateFact};

const COLUMNS: &str = "id, fact, created_at, updated_at";

/// Provides CRUD operations for cat facts.
pub struct FactRepo;

impl FactRepo {
    /// Insert a new fact. Fails with a unique violation on duplicate text.
    pub async fn create(pool: &SqlitePool, input: &CreateFact) -> Result<Fact, sqlx::Error> {
        let query = format!("INSERT INTO facts (fact) VALUES ($1) RETURNING {COLUMNS}");
        sqlx::query_as::<_, Fact>(&query)
            .bind(&input.fact)
            .fetch_one(pool)
            .await
    }

    /// Insert a fact unless identical text already exists.
    ///
    /// Returns `true` if a row was inserted.
    pub async fn insert_if_absent(pool: &SqlitePool, fact: &str) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("INSERT INTO facts (fact) VALUES ($1) ON CONFLICT (fact) DO NOTHING")
            .bind(fact)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_by_id(pool: &SqlitePool, id: DbId) -> Result<Option<Fact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facts WHERE id = $1");
        sqlx::query_as::<_, Fact>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// List all facts in insertion order.
    pub async fn list(pool: &SqlitePool) -> Result<Vec<Fact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facts ORDER BY id ASC");
        sqlx::query_as::<_, Fact>(&query).fetch_all(pool).await
    }

    /// Pick one fact uniformly at random. `None` when the table is empty.
    pub async fn random(pool: &SqlitePool) -> Result<Option<Fact>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} FROM facts ORDER BY RANDOM() LIMIT 1");
        sqlx::query_as::<_, Fact>(&query).fetch_optional(pool).await
    }

    /// Replace a fact's text. Returns `None` if no row with `id` exists.
    pub async fn update(
        pool: &SqlitePool,
        id: DbId,
        input: &UpdateFact,
    ) -> Result<Option<Fact>, sqlx::Error> {
        let query = format!(
            "UPDATE facts SET fact = $2, updated_at = {NOW_SQL}
             WHERE id = $1
             RETURNING {COLUMNS}"
        );
        sqlx::query_as::<_, Fact>(&query)
            .bind(id)
            .bind(&input.fact)
            .fetch_optional(pool)
            .await
    }

    pub async fn delete(pool: &SqlitePool, id: DbId) -> Result<bool, sqlx::Error> {
        let result = sqlx::query("DELETE FROM facts WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
