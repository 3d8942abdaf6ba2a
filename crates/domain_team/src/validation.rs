//! Invitation validation rules
//!
//! # Batch Rules
//! - A batch must contain at least one invitation
//! - Every email must be a well-formed address
//! - Every role must be a non-empty name
//! - The same email may not appear twice in one batch
//!
//! # Membership Rule
//! - An invitee may not already be a member of the target account

use std::collections::HashSet;

use validator::ValidateEmail;

use crate::error::InvitationError;
use crate::invitation::InvitationRequest;
use crate::member::AccountMember;

/// Result of invitation validation
#[derive(Debug, Clone)]
pub struct ValidationResult {
    /// Whether the batch is valid
    pub is_valid: bool,
    /// List of validation errors
    pub errors: Vec<String>,
}

impl ValidationResult {
    /// Creates a successful validation result
    pub fn ok() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Adds an error to the result
    pub fn add_error(&mut self, error: impl Into<String>) {
        self.errors.push(error.into());
        self.is_valid = false;
    }

    /// Converts the result into a `Result`, joining the collected errors
    pub fn into_result(self) -> Result<(), InvitationError> {
        if self.is_valid {
            Ok(())
        } else {
            Err(InvitationError::validation_failed(self.errors))
        }
    }
}

impl Default for ValidationResult {
    fn default() -> Self {
        Self::ok()
    }
}

/// Validator for invitation requests
pub struct InvitationValidator;

impl InvitationValidator {
    /// Validates the shape of an invite-members batch
    ///
    /// Collects every problem instead of stopping at the first one.
    pub fn validate_batch(invitations: &[InvitationRequest]) -> ValidationResult {
        let mut result = ValidationResult::ok();

        if invitations.is_empty() {
            result.add_error("At least one invitation is required");
            return result;
        }

        let mut seen = HashSet::new();
        for (index, invitation) in invitations.iter().enumerate() {
            Self::validate_single(index, invitation, &mut result);

            if !seen.insert(invitation.normalized_email()) {
                result.add_error(format!(
                    "Duplicate email in invitations: {}",
                    invitation.email.trim()
                ));
            }
        }

        result
    }

    /// Validates a role name for an update
    pub fn validate_role(role: &str) -> Result<(), InvitationError> {
        if role.trim().is_empty() {
            return Err(InvitationError::InvalidInvitation(
                "Role cannot be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Fails if the invitee's email already belongs to one of `members`
    pub fn ensure_not_member(
        invitation: &InvitationRequest,
        members: &[AccountMember],
    ) -> Result<(), InvitationError> {
        if members.iter().any(|member| member.has_email(&invitation.email)) {
            return Err(InvitationError::already_member(invitation.email.trim()));
        }
        Ok(())
    }

    fn validate_single(index: usize, invitation: &InvitationRequest, result: &mut ValidationResult) {
        let email = invitation.email.trim();
        if email.is_empty() {
            result.add_error(format!("Invitation {}: email is required", index));
        } else if !email.validate_email() {
            result.add_error(format!("Invitation {}: invalid email format: {}", index, email));
        }

        if invitation.role.trim().is_empty() {
            result.add_error(format!("Invitation {}: role is required", index));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_batch() {
        let batch = vec![
            InvitationRequest::new("a@example.com", "member"),
            InvitationRequest::new("b@example.com", "owner"),
        ];
        let result = InvitationValidator::validate_batch(&batch);
        assert!(result.is_valid, "{:?}", result.errors);
    }

    #[test]
    fn test_empty_batch() {
        let result = InvitationValidator::validate_batch(&[]);
        assert!(!result.is_valid);
        assert_eq!(result.errors.len(), 1);
    }

    #[test]
    fn test_collects_every_error() {
        let batch = vec![
            InvitationRequest::new("not-an-email", ""),
            InvitationRequest::new("", "member"),
        ];
        let result = InvitationValidator::validate_batch(&batch);
        assert_eq!(result.errors.len(), 3);
    }

    #[test]
    fn test_duplicate_emails_differing_in_case() {
        let batch = vec![
            InvitationRequest::new("a@example.com", "member"),
            InvitationRequest::new("A@Example.com", "member"),
        ];
        let result = InvitationValidator::validate_batch(&batch);
        assert!(!result.is_valid);
        assert!(result.errors[0].contains("Duplicate"));
    }

    #[test]
    fn test_validate_role() {
        assert!(InvitationValidator::validate_role("member").is_ok());
        assert!(InvitationValidator::validate_role("   ").is_err());
    }
}
