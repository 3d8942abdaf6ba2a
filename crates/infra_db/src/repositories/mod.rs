//! Repository implementations
//!
//! Repositories own the SQL and return plain row types. Mapping rows into
//! domain types is the adapter's job.
//!
//! Queries are built at runtime with `sqlx::query_as` and `FromRow` rows, so
//! the crate builds without a live database.

pub mod team_accounts;

pub use team_accounts::{AccountRow, InvitationRow, MemberRow, NewInvitation, TeamAccountsRepository};
