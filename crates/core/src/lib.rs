//! Domain types and rules shared by the database and API crates.
//!
//! Nothing in here talks to the database; the file store and the record
//! lock table only touch the local filesystem and process memory.

pub mod error;
pub mod file_store;
pub mod locks;
pub mod patch;
pub mod types;
pub mod uploads;
pub mod validation;
