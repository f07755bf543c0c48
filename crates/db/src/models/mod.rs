//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod post;
pub mod project_script;
pub mod setting;
pub mod social_link;
pub mod tutorial;
pub mod unlock;
