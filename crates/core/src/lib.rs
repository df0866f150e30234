//! Domain logic for the Timewheel backend.
//!
//! Pure, I/O-free building blocks shared by the database and API crates:
//! the error taxonomy, role constants, invitation rules, taxonomy and
//! time-entry validation, and summary prompt construction.

pub mod error;
pub mod invitation;
pub mod organization;
pub mod roles;
pub mod summary;
pub mod taxonomy;
pub mod time_entry;
pub mod types;
pub mod webhook;
