//! Operations that span more than one store.

pub mod developer;
