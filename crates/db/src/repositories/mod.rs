//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument. Cross-table transactional
//! logic (invitation reconciliation) lives in [`reconciliation`].

pub mod invitation_repo;
pub mod member_repo;
pub mod organization_repo;
pub mod reconciliation;
pub mod session_repo;
pub mod taxonomy_repo;
pub mod time_entry_repo;
pub mod user_repo;

pub use invitation_repo::InvitationRepo;
pub use member_repo::MemberRepo;
pub use organization_repo::OrganizationRepo;
pub use reconciliation::Reconciler;
pub use session_repo::SessionRepo;
pub use taxonomy_repo::{ActivityRepo, AreaRepo, FieldRepo};
pub use time_entry_repo::TimeEntryRepo;
pub use user_repo::UserRepo;
