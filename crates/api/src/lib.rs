//! Cat facts API server library.
//!
//! Exposes the core building blocks (config, state, error handling, routes,
//! the developer service) so integration tests and the binary entrypoint
//! can both access them.

pub mod config;
pub mod error;
pub mod handlers;
pub mod multipart;
pub mod router;
pub mod routes;
pub mod services;
pub mod state;
