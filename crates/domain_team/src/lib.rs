//! Team Accounts Domain
//!
//! This crate owns the invitation lifecycle for team accounts: inviting
//! people by email with a role, changing the role of a pending invitation,
//! removing it, extending its expiry, and accepting it with the emailed token.
//!
//! The storage layer (tables plus the `get_account_members`,
//! `add_invitations_to_account`, and `accept_invitation` functions) enforces
//! token uniqueness, expiry, and role validity. This crate checks request
//! shape and existing membership before forwarding each call through the
//! [`TeamAccountsPort`].
//!
//! # Examples
//!
//! ```rust,ignore
//! use domain_team::{AccountInvitationsService, InvitationRequest};
//! use std::sync::Arc;
//!
//! let service = AccountInvitationsService::new(Arc::new(adapter));
//! let created = service
//!     .send_invitations("acme", vec![InvitationRequest::new("jo@example.com", "member")], None)
//!     .await?;
//! ```

pub mod account;
pub mod member;
pub mod invitation;
pub mod error;
pub mod validation;
pub mod ports;
pub mod service;

pub use account::Account;
pub use member::{AccountMember, roles};
pub use invitation::{Invitation, InvitationRequest, INVITATION_VALIDITY_DAYS};
pub use error::InvitationError;
pub use validation::{InvitationValidator, ValidationResult};
pub use ports::TeamAccountsPort;
#[cfg(any(test, feature = "mock"))]
pub use ports::mock::{MockTeamAccountsPort, PortOperation};
pub use service::{AccountInvitationsService, OperationOutcome};
