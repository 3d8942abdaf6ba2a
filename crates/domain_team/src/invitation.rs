//! Invitation model
//!
//! An invitation is an outstanding offer for someone, identified by email,
//! to join a team account with a given role. It carries a random token that
//! the invitee presents to accept, and stops being acceptable once
//! `expires_at` has passed.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, InvitationId, UserId};
use core_kernel::temporal::{days_from, is_expired, TemporalError};

/// Days an invitation stays valid after it is created or renewed
pub const INVITATION_VALIDITY_DAYS: i64 = 7;

/// A stored invitation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Invitation {
    pub id: InvitationId,
    pub email: String,
    pub account_id: AccountId,
    pub role: String,
    pub invite_token: String,
    pub invited_by: Option<UserId>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Invitation {
    /// Returns true if the invitation can no longer be accepted at `now`
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        is_expired(self.expires_at, now)
    }

    /// Computes the expiry an invitation renewed at `now` receives
    pub fn renewal_expiry(now: DateTime<Utc>) -> Result<DateTime<Utc>, TemporalError> {
        days_from(now, INVITATION_VALIDITY_DAYS)
    }
}

/// A single entry of an invite-members request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InvitationRequest {
    pub email: String,
    pub role: String,
}

impl InvitationRequest {
    pub fn new(email: impl Into<String>, role: impl Into<String>) -> Self {
        Self {
            email: email.into(),
            role: role.into(),
        }
    }

    /// Lower-cased, trimmed email used for comparisons
    pub fn normalized_email(&self) -> String {
        self.email.trim().to_ascii_lowercase()
    }
}
