//! Domain model structs and DTOs.
//!
//! Each submodule contains:
//! - A `FromRow` + `Serialize` entity struct matching the database row
//! - A `Deserialize` create DTO for inserts
//! - A `Deserialize` update DTO (all `Option` fields) for patches

pub mod invitation;
pub mod member;
pub mod organization;
pub mod reconciliation;
pub mod session;
pub mod taxonomy;
pub mod time_entry;
pub mod user;
