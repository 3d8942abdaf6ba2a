//! Invitation DTOs

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use domain_team::{AccountMember, Invitation, InvitationRequest, OperationOutcome};

#[derive(Debug, Serialize, Deserialize, Validate)]
pub struct InvitationEntry {
    #[validate(email(message = "must be a valid email address"))]
    pub email: String,
    #[validate(length(min = 1, max = 50))]
    pub role: String,
}

impl From<InvitationEntry> for InvitationRequest {
    fn from(entry: InvitationEntry) -> Self {
        InvitationRequest::new(entry.email, entry.role)
    }
}

#[derive(Debug, Deserialize, Validate)]
pub struct SendInvitationsRequest {
    #[validate(length(min = 1, max = 100), nested)]
    pub invitations: Vec<InvitationEntry>,
}

#[derive(Debug, Deserialize, Validate)]
pub struct UpdateInvitationRequest {
    #[validate(length(min = 1, max = 50))]
    pub role: String,
}

#[derive(Debug, Deserialize, Validate)]
pub struct AcceptInvitationRequest {
    #[validate(length(min = 1, max = 255))]
    pub invite_token: String,
}

#[derive(Debug, Serialize)]
pub struct InvitationResponse {
    pub id: i64,
    pub email: String,
    pub account_id: Uuid,
    pub role: String,
    pub invited_by: Option<Uuid>,
    /// Only returned when the invitation is created
    #[serde(skip_serializing_if = "Option::is_none")]
    pub invite_token: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl InvitationResponse {
    /// Response for a freshly stored invitation, token included
    pub fn created(invitation: Invitation) -> Self {
        let token = invitation.invite_token.clone();
        Self {
            invite_token: Some(token),
            ..Self::from(invitation)
        }
    }
}

impl From<Invitation> for InvitationResponse {
    fn from(invitation: Invitation) -> Self {
        Self {
            id: invitation.id.value(),
            email: invitation.email,
            account_id: *invitation.account_id.as_uuid(),
            role: invitation.role,
            invited_by: invitation.invited_by.map(|u| *u.as_uuid()),
            invite_token: None,
            created_at: invitation.created_at,
            updated_at: invitation.updated_at,
            expires_at: invitation.expires_at,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SendInvitationsResponse {
    #[serde(flatten)]
    pub outcome: OperationOutcome,
    pub invitations: Vec<InvitationResponse>,
}

#[derive(Debug, Serialize)]
pub struct RenewInvitationResponse {
    #[serde(flatten)]
    pub outcome: OperationOutcome,
    pub expires_at: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct AcceptInvitationResponse {
    #[serde(flatten)]
    pub outcome: OperationOutcome,
    pub account_id: Uuid,
}

#[derive(Debug, Serialize)]
pub struct MemberResponse {
    pub user_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub role_hierarchy_level: i32,
    pub created_at: DateTime<Utc>,
}

impl From<AccountMember> for MemberResponse {
    fn from(member: AccountMember) -> Self {
        Self {
            user_id: *member.user_id.as_uuid(),
            email: member.email,
            name: member.name,
            role: member.role,
            role_hierarchy_level: member.role_hierarchy_level,
            created_at: member.created_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_request_validation() {
        let request: SendInvitationsRequest = serde_json::from_str(
            r#"{"invitations":[{"email":"not-an-email","role":"member"}]}"#,
        )
        .unwrap();
        assert!(request.validate().is_err());

        let empty: SendInvitationsRequest = serde_json::from_str(r#"{"invitations":[]}"#).unwrap();
        assert!(empty.validate().is_err());

        let ok: SendInvitationsRequest = serde_json::from_str(
            r#"{"invitations":[{"email":"kim@example.com","role":"member"}]}"#,
        )
        .unwrap();
        assert!(ok.validate().is_ok());
    }
}
