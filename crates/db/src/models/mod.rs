//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - `Deserialize` DTOs for the inserts and updates the service supports

pub mod claim;
pub mod diagnostics;
pub mod food_listing;
pub mod provider;
pub mod receiver;
