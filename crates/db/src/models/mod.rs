//! Row models and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the operations that need structured input

pub mod board;
pub mod change;
pub mod comment;
pub mod note;
pub mod user;
