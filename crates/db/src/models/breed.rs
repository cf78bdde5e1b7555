//! Breed entity model and DTOs.

use catfacts_core::patch::Patch;
use catfacts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `breeds` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Breed {
    pub id: DbId,
    pub name: String,
    pub origin: Option<String>,
    pub description: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a new breed.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateBreed {
    pub name: String,
    pub origin: Option<String>,
    pub description: Option<String>,
}

/// DTO for updating an existing breed.
///
/// Omitted keys keep their stored value; `null` clears `origin`/`description`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateBreed {
    pub name: Option<String>,
    #[serde(default)]
    pub origin: Patch<Option<String>>,
    #[serde(default)]
    pub description: Patch<Option<String>>,
}
