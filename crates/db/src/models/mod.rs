//! Row models and insert DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A plain insert struct consumed by the matching repository

pub mod dish;
pub mod restaurant;
