//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&SqlitePool` as the first argument.

pub mod breed_repo;
pub mod cat_repo;
pub mod developer_repo;
pub mod fact_repo;

pub use breed_repo::BreedRepo;
pub use cat_repo::CatRepo;
pub use developer_repo::DeveloperRepo;
pub use fact_repo::FactRepo;

/// SQL expression for the current UTC time in the stored RFC 3339 format.
pub(crate) const NOW_SQL: &str = "strftime('%Y-%m-%dT%H:%M:%fZ', 'now')";
