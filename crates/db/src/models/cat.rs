//! Cat entity model and DTOs.

use catfacts_core::patch::Patch;
use catfacts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `cats` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Cat {
    pub id: DbId,
    pub name: String,
    pub breed_id: Option<DbId>,
    pub age: Option<i64>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// A cat joined with its breed's display fields, as listed publicly.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct CatWithBreed {
    pub id: DbId,
    pub name: String,
    pub breed_id: Option<DbId>,
    pub age: Option<i64>,
    pub breed_name: Option<String>,
    pub breed_description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new cat.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateCat {
    pub name: String,
    pub breed_id: Option<DbId>,
    pub age: Option<i64>,
}

/// DTO for updating an existing cat.
///
/// Omitted keys keep their stored value; `null` clears `breed_id`/`age`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateCat {
    pub name: Option<String>,
    #[serde(default)]
    pub breed_id: Patch<Option<DbId>>,
    #[serde(default)]
    pub age: Patch<Option<i64>>,
}
