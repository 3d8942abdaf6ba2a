//! Infrastructure Database Layer
//!
//! PostgreSQL access for the team accounts domain using SQLx.
//!
//! # Architecture
//!
//! The crate follows the repository pattern. [`TeamAccountsRepository`]
//! owns the SQL and returns row types; [`PostgresTeamAccountsAdapter`]
//! implements the domain's `TeamAccountsPort` on top of it and translates
//! rows and errors into domain terms.
//!
//! Invariants such as token uniqueness, expiry, and role validity live in the
//! schema. The `get_account_members`, `add_invitations_to_account`, and
//! `accept_invitation` SQL functions are called like remote procedures.
//!
//! # Example
//!
//! ```rust,ignore
//! use infra_db::{create_pool, DatabaseConfig, PostgresTeamAccountsAdapter};
//!
//! let pool = create_pool(DatabaseConfig::new("postgres://localhost/event_city")).await?;
//! let adapter = PostgresTeamAccountsAdapter::new(pool);
//! ```

pub mod pool;
pub mod error;
pub mod repositories;
pub mod adapters;

pub use pool::{DatabasePool, DEFAULT_DATABASE_URL, create_pool, create_pool_from_url, run_migrations, DatabaseConfig};
pub use error::DatabaseError;
pub use repositories::TeamAccountsRepository;
pub use adapters::PostgresTeamAccountsAdapter;
