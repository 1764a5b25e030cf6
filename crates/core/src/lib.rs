//! Domain logic for the Corkboard note service.
//!
//! This crate has no internal dependencies so the diff engine and
//! validation rules can be used by the repository layer, the API layer,
//! and any future CLI tooling alike.

pub mod autosave;
pub mod diff;
pub mod error;
pub mod note;
pub mod types;
