//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` entity struct matching the database row
//! - A create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) where patching exists

pub mod auth_session;
pub mod diary;
pub mod user;
