//! Domain Adapters
//!
//! Implementations of domain ports backed by PostgreSQL.
//!
//! # Usage
//!
//! ```rust,ignore
//! use infra_db::adapters::PostgresTeamAccountsAdapter;
//! use domain_team::TeamAccountsPort;
//!
//! let adapter = PostgresTeamAccountsAdapter::new(pool);
//! let members = adapter.get_account_members("acme", None).await?;
//! ```

pub mod team_accounts;

pub use team_accounts::PostgresTeamAccountsAdapter;
