//! Team accounts domain errors

use thiserror::Error;

use core_kernel::{InvitationId, PortError};
use core_kernel::temporal::TemporalError;

/// Errors that can occur while managing invitations
#[derive(Debug, Error)]
pub enum InvitationError {
    /// No account exists with the given slug
    #[error("Account not found: {0}")]
    AccountNotFound(String),

    /// No invitation exists with the given id
    #[error("Invitation not found: {0}")]
    InvitationNotFound(InvitationId),

    /// The invitee is already a member of the account
    #[error("User already member of the team: {email}")]
    AlreadyMember { email: String },

    /// The request failed local validation
    #[error("Invalid invitation: {0}")]
    InvalidInvitation(String),

    /// The invite token is unknown or expired
    #[error("Invalid or expired invitation token")]
    InvalidToken,

    #[error("Temporal error: {0}")]
    Temporal(#[from] TemporalError),

    /// The storage port failed
    #[error(transparent)]
    Port(#[from] PortError),
}

impl InvitationError {
    /// Creates an InvalidInvitation error from a list of validation errors
    pub fn validation_failed(errors: Vec<String>) -> Self {
        InvitationError::InvalidInvitation(errors.join("; "))
    }

    pub fn already_member(email: impl Into<String>) -> Self {
        InvitationError::AlreadyMember { email: email.into() }
    }

    /// Returns true if the caller can fix the request and try again
    pub fn is_client_error(&self) -> bool {
        match self {
            InvitationError::Port(port) => matches!(
                port,
                PortError::NotFound { .. } | PortError::Validation { .. } | PortError::Conflict { .. }
            ),
            InvitationError::Temporal(_) => false,
            _ => true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_failed_joins_messages() {
        let error = InvitationError::validation_failed(vec![
            "a is bad".to_string(),
            "b is bad".to_string(),
        ]);
        assert_eq!(error.to_string(), "Invalid invitation: a is bad; b is bad");
    }

    #[test]
    fn test_client_error_classification() {
        assert!(InvitationError::already_member("x@y.z").is_client_error());
        assert!(InvitationError::from(PortError::conflict("dup")).is_client_error());
        assert!(!InvitationError::from(PortError::connection("down")).is_client_error());
    }
}
