//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - An update DTO carrying only the fields the caller supplied

pub mod breed;
pub mod cat;
pub mod developer;
pub mod fact;
