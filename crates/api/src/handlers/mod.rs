//! HTTP request handlers, grouped per resource.

pub mod analytics;
pub mod auth;
pub mod invitations;
pub mod members;
pub mod organizations;
pub mod summaries;
pub mod taxonomy;
pub mod time_entries;
pub mod webhooks;
