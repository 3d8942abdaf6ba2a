//! Invitation Service Tests
//!
//! Exercises `AccountInvitationsService` against the in-memory mock port.
//!
//! # Test Organization
//!
//! - `send_invitations` - batch validation, membership checks, storage
//! - `mutations` - delete, update role, renew
//! - `accept` - token acceptance
//! - `listing` - member and invitation listing

use std::sync::Arc;

use chrono::{Duration, TimeZone, Utc};
use core_kernel::{FixedClock, InvitationId, PortError, UserId};
use domain_team::{
    roles, Account, AccountInvitationsService, InvitationError, InvitationRequest,
    MockTeamAccountsPort, PortOperation,
};

// ============================================================================
// TEST FIXTURES
// ============================================================================

const SLUG: &str = "riverside-events";

async fn seeded_port() -> MockTeamAccountsPort {
    MockTeamAccountsPort::new()
        .with_account(Account::new(SLUG, "Riverside Events"))
        .await
        .with_member(SLUG, "owner@riverside.test", roles::OWNER)
        .await
        .with_member(SLUG, "dana@riverside.test", roles::MEMBER)
        .await
}

fn service_over(port: Arc<MockTeamAccountsPort>) -> AccountInvitationsService {
    AccountInvitationsService::new(port)
}

async fn invite_one(service: &AccountInvitationsService, email: &str) -> InvitationId {
    let created = service
        .send_invitations(SLUG, vec![InvitationRequest::new(email, roles::MEMBER)], None)
        .await
        .expect("invitation should be stored");
    created[0].id
}

// ============================================================================
// SEND INVITATIONS
// ============================================================================

mod send_invitations {
    use super::*;

    #[tokio::test]
    async fn test_stores_every_invitation_in_one_batch() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());

        let created = service
            .send_invitations(
                SLUG,
                vec![
                    InvitationRequest::new("kim@example.com", roles::MEMBER),
                    InvitationRequest::new("lee@example.com", roles::OWNER),
                ],
                None,
            )
            .await
            .unwrap();

        assert_eq!(created.len(), 2);
        assert_eq!(port.invitations().await.len(), 2);
        assert!(created.iter().all(|i| !i.invite_token.is_empty()));
        assert_eq!(port.member_lookups(), 2);
    }

    #[tokio::test]
    async fn test_rejects_batch_when_any_invitee_is_a_member() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());

        let result = service
            .send_invitations(
                SLUG,
                vec![
                    InvitationRequest::new("kim@example.com", roles::MEMBER),
                    InvitationRequest::new("Dana@Riverside.test", roles::MEMBER),
                ],
                None,
            )
            .await;

        assert!(matches!(
            result,
            Err(InvitationError::AlreadyMember { ref email }) if email == "Dana@Riverside.test"
        ));
        assert!(port.invitations().await.is_empty(), "nothing may be written");
    }

    #[tokio::test]
    async fn test_unknown_account() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());

        let result = service
            .send_invitations("nope", vec![InvitationRequest::new("kim@example.com", "member")], None)
            .await;

        assert!(matches!(result, Err(InvitationError::AccountNotFound(ref slug)) if slug == "nope"));
        assert_eq!(port.member_lookups(), 0);
    }

    #[tokio::test]
    async fn test_malformed_batch_never_reaches_member_lookup() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());

        let result = service
            .send_invitations(SLUG, vec![InvitationRequest::new("not-an-email", "member")], None)
            .await;

        assert!(matches!(result, Err(InvitationError::InvalidInvitation(_))));
        assert_eq!(port.member_lookups(), 0);
    }

    #[tokio::test]
    async fn test_member_lookup_failure_aborts_batch() {
        let port = Arc::new(seeded_port().await);
        port.fail_on(PortOperation::GetMembers).await;
        let service = service_over(port.clone());

        let result = service
            .send_invitations(SLUG, vec![InvitationRequest::new("kim@example.com", "member")], None)
            .await;

        assert!(matches!(result, Err(InvitationError::Port(PortError::Connection { .. }))));
        assert!(port.invitations().await.is_empty());
    }

    #[tokio::test]
    async fn test_storage_failure_is_reported() {
        let port = Arc::new(seeded_port().await);
        port.fail_on(PortOperation::AddInvitations).await;
        let service = service_over(port.clone());

        let result = service
            .send_invitations(SLUG, vec![InvitationRequest::new("kim@example.com", "member")], None)
            .await;

        assert!(result.is_err());
    }

    #[tokio::test]
    async fn test_second_invitation_for_same_email_conflicts() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        invite_one(&service, "kim@example.com").await;

        let result = service
            .send_invitations(SLUG, vec![InvitationRequest::new("KIM@example.com", "member")], None)
            .await;

        assert!(matches!(result, Err(InvitationError::Port(PortError::Conflict { .. }))));
        assert_eq!(port.invitations().await.len(), 1);
    }
}

// ============================================================================
// DELETE / UPDATE / RENEW
// ============================================================================

mod mutations {
    use super::*;

    #[tokio::test]
    async fn test_delete_invitation() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let id = invite_one(&service, "kim@example.com").await;

        let result = service.delete_invitation(id).await;

        assert!(result.is_ok());
        assert!(port.invitations().await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_missing_invitation() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port);

        let result = service.delete_invitation(InvitationId::new(404)).await;

        assert!(matches!(result, Err(InvitationError::InvitationNotFound(_))));
    }

    #[tokio::test]
    async fn test_delete_port_failure() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let id = invite_one(&service, "kim@example.com").await;
        port.fail_on(PortOperation::DeleteInvitation).await;

        let result = service.delete_invitation(id).await;

        assert!(matches!(result, Err(InvitationError::Port(PortError::Connection { .. }))));
        assert_eq!(port.invitations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_update_invitation_role() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let id = invite_one(&service, "kim@example.com").await;

        service.update_invitation(id, roles::OWNER).await.unwrap();

        assert_eq!(port.invitations().await[0].role, roles::OWNER);
    }

    #[tokio::test]
    async fn test_update_rejects_blank_role() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let id = invite_one(&service, "kim@example.com").await;

        let result = service.update_invitation(id, "  ").await;

        assert!(matches!(result, Err(InvitationError::InvalidInvitation(_))));
        assert_eq!(port.invitations().await[0].role, roles::MEMBER);
    }

    #[tokio::test]
    async fn test_update_port_failure() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let id = invite_one(&service, "kim@example.com").await;
        port.fail_on(PortOperation::UpdateRole).await;

        let result = service.update_invitation(id, roles::OWNER).await;

        assert!(matches!(result, Err(InvitationError::Port(PortError::Connection { .. }))));
    }

    #[tokio::test]
    async fn test_renew_sets_expiry_exactly_seven_days_from_now() {
        let now = Utc.with_ymd_and_hms(2024, 11, 28, 17, 45, 12).unwrap();
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone()).with_clock(Arc::new(FixedClock::new(now)));
        let id = invite_one(&service, "kim@example.com").await;

        let expires_at = service.renew_invitation(id).await.unwrap();

        assert_eq!(expires_at, now + Duration::days(7));
        assert_eq!(expires_at.to_rfc3339(), "2024-12-05T17:45:12+00:00");
        assert_eq!(port.invitations().await[0].expires_at, expires_at);
    }

    #[tokio::test]
    async fn test_renew_port_failure() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let id = invite_one(&service, "kim@example.com").await;
        port.fail_on(PortOperation::UpdateExpiry).await;

        let result = service.renew_invitation(id).await;

        assert!(matches!(result, Err(InvitationError::Port(PortError::Connection { .. }))));
    }

    #[tokio::test]
    async fn test_renew_missing_invitation() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port);

        let result = service.renew_invitation(InvitationId::new(99)).await;

        assert!(matches!(result, Err(InvitationError::InvitationNotFound(_))));
    }
}

// ============================================================================
// ACCEPT
// ============================================================================

mod accept {
    use super::*;

    #[tokio::test]
    async fn test_accept_turns_invitation_into_membership() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let created = service
            .send_invitations(SLUG, vec![InvitationRequest::new("kim@example.com", roles::MEMBER)], None)
            .await
            .unwrap();
        let user_id = port.register_user("kim@example.com").await;

        let account_id = service
            .accept_invitation_to_team(user_id, &created[0].invite_token)
            .await
            .unwrap();

        assert_eq!(account_id, created[0].account_id);
        assert!(port.invitations().await.is_empty());
        let members = service.list_members(SLUG).await.unwrap();
        assert!(members.iter().any(|m| m.user_id == user_id && m.role == roles::MEMBER));
    }

    #[tokio::test]
    async fn test_unknown_token() {
        let port = Arc::new(seeded_port().await);
        let user_id = port.register_user("kim@example.com").await;
        let service = service_over(port);

        let result = service.accept_invitation_to_team(user_id, "bogus").await;

        assert!(matches!(result, Err(InvitationError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_blank_token_is_rejected_locally() {
        let port = Arc::new(seeded_port().await);
        port.fail_on(PortOperation::AcceptInvitation).await;
        let user_id = port.register_user("kim@example.com").await;
        let service = service_over(port);

        let result = service.accept_invitation_to_team(user_id, "   ").await;

        assert!(matches!(result, Err(InvitationError::InvalidToken)));
    }

    #[tokio::test]
    async fn test_unregistered_user_is_not_a_token_problem() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let created = service
            .send_invitations(SLUG, vec![InvitationRequest::new("kim@example.com", roles::MEMBER)], None)
            .await
            .unwrap();

        let result = service
            .accept_invitation_to_team(UserId::new(), &created[0].invite_token)
            .await;

        assert!(matches!(result, Err(InvitationError::Port(ref e)) if e.is_missing("User")));
        assert_eq!(port.invitations().await.len(), 1);
    }

    #[tokio::test]
    async fn test_port_failure_propagates_like_other_operations() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port.clone());
        let created = service
            .send_invitations(SLUG, vec![InvitationRequest::new("kim@example.com", roles::MEMBER)], None)
            .await
            .unwrap();
        let user_id = port.register_user("kim@example.com").await;
        port.fail_on(PortOperation::AcceptInvitation).await;

        let result = service
            .accept_invitation_to_team(user_id, &created[0].invite_token)
            .await;

        assert!(matches!(result, Err(InvitationError::Port(PortError::Connection { .. }))));
        assert_eq!(port.invitations().await.len(), 1);
    }
}

// ============================================================================
// LISTING
// ============================================================================

mod listing {
    use super::*;

    #[tokio::test]
    async fn test_list_members() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port);

        let members = service.list_members(SLUG).await.unwrap();

        assert_eq!(members.len(), 2);
        assert_eq!(members.iter().filter(|m| m.is_owner()).count(), 1);
    }

    #[tokio::test]
    async fn test_list_invitations_for_unknown_account() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port);

        let result = service.list_invitations("ghost-town").await;

        assert!(matches!(result, Err(InvitationError::AccountNotFound(_))));
    }

    #[tokio::test]
    async fn test_list_invitations() {
        let port = Arc::new(seeded_port().await);
        let service = service_over(port);
        invite_one(&service, "kim@example.com").await;
        invite_one(&service, "lee@example.com").await;

        let invitations = service.list_invitations(SLUG).await.unwrap();

        assert_eq!(invitations.len(), 2);
    }
}
