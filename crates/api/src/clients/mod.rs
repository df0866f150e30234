//! Clients for the hosted services this backend composes: the identity
//! provider, the LLM completions API, and outbound SMTP.
//!
//! The identity and LLM clients are trait objects behind `async_trait`
//! seams so integration tests can substitute deterministic stubs.

pub mod identity;
pub mod llm;
pub mod mailer;
