//! Core Kernel - Foundational types and utilities for the event city backend
//!
//! This crate provides the building blocks shared by every domain crate:
//! - Strongly-typed identifiers for accounts, users, and invitations
//! - A clock abstraction so expiry arithmetic can be tested deterministically
//! - Port infrastructure (error type, health checks, operation metadata)

pub mod identifiers;
pub mod temporal;
pub mod ports;

pub use identifiers::{AccountId, UserId, SubmissionId, InvitationId};
pub use temporal::{Clock, SystemClock, FixedClock, days_from};
pub use ports::{
    PortError, DomainPort, AdapterHealth, HealthCheckResult, HealthCheckable,
    OperationMetadata,
};
