//! Test Utilities Crate
//!
//! Shared test infrastructure for the event city workspace.
//!
//! # Modules
//!
//! - `fixtures`: Fixed instants, a seeded in-memory port, sample drafts
//! - `builders`: Builders for invitations, members, and venue drafts
//! - `database`: Postgres testcontainer with the schema applied
//! - `assertions`: Assertion helpers for envelopes and expiry
//! - `generators`: Property-based test data generators

pub mod fixtures;
pub mod builders;
pub mod database;
pub mod assertions;
pub mod generators;

pub use fixtures::*;
pub use builders::*;
pub use database::*;
pub use assertions::*;
pub use generators::*;
