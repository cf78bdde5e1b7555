//! Fact entity model and DTOs.

use catfacts_core::types::{DbId, Timestamp};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `facts` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct Fact {
    pub id: DbId,
    pub fact: String,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a fact.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateFact {
    pub fact: String,
}

/// DTO for replacing a fact's text.
#[derive(Debug, Clone, Deserialize)]
pub struct UpdateFact {
    pub fact: String,
}
