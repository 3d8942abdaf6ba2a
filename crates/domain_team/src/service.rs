//! Account invitations service
//!
//! Orchestrates the invitation lifecycle on top of a [`TeamAccountsPort`].
//! Every operation logs a start and an outcome message under the
//! `invitations` namespace and reports failures as [`InvitationError`].
//! The HTTP layer answers with [`OperationOutcome::success`] once an
//! operation returns `Ok`, and with [`OperationOutcome::failure`] inside
//! every error body.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures::future::try_join_all;
use serde::{Deserialize, Serialize};
use tracing::{error, info, instrument};

use core_kernel::{AccountId, Clock, InvitationId, OperationMetadata, PortError, SystemClock, UserId};

use crate::error::InvitationError;
use crate::invitation::{Invitation, InvitationRequest};
use crate::member::AccountMember;
use crate::ports::TeamAccountsPort;
use crate::validation::InvitationValidator;

const NAMESPACE: &str = "invitations";

/// Boolean outcome envelope returned by mutating endpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationOutcome {
    pub success: bool,
}

impl OperationOutcome {
    pub fn success() -> Self {
        Self { success: true }
    }

    pub fn failure() -> Self {
        Self { success: false }
    }
}

/// Service for managing account invitations
///
/// # Example
///
/// ```rust,ignore
/// let service = AccountInvitationsService::new(port);
/// service.renew_invitation(InvitationId::new(12)).await?;
/// ```
#[derive(Clone)]
pub struct AccountInvitationsService {
    port: Arc<dyn TeamAccountsPort>,
    clock: Arc<dyn Clock>,
}

impl std::fmt::Debug for AccountInvitationsService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AccountInvitationsService")
            .field("clock", &self.clock)
            .finish_non_exhaustive()
    }
}

impl AccountInvitationsService {
    /// Creates a service backed by `port` using wall-clock time
    pub fn new(port: Arc<dyn TeamAccountsPort>) -> Self {
        Self {
            port,
            clock: Arc::new(SystemClock),
        }
    }

    /// Replaces the clock used for expiry arithmetic
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Returns the underlying port
    pub fn port(&self) -> &Arc<dyn TeamAccountsPort> {
        &self.port
    }

    /// Removes an invitation
    ///
    /// # Errors
    ///
    /// `InvitationNotFound` if no row matched, `Port` if the delete failed
    #[instrument(skip(self), fields(namespace = NAMESPACE))]
    pub async fn delete_invitation(&self, invitation_id: InvitationId) -> Result<(), InvitationError> {
        info!("Removing invitation...");

        let result = self
            .port
            .delete_invitation(invitation_id, Some(metadata(NAMESPACE)))
            .await
            .map_err(InvitationError::from)
            .and_then(|rows| require_row(rows, invitation_id));

        if let Err(ref e) = result {
            error!(error = %e, "Failed to remove invitation");
            return result;
        }

        info!("Invitation successfully removed");
        result
    }

    /// Changes the role of a pending invitation
    #[instrument(skip(self), fields(namespace = NAMESPACE))]
    pub async fn update_invitation(
        &self,
        invitation_id: InvitationId,
        role: &str,
    ) -> Result<(), InvitationError> {
        info!("Updating invitation...");

        let result = match InvitationValidator::validate_role(role) {
            Ok(()) => self
                .port
                .update_invitation_role(invitation_id, role.trim(), Some(metadata(NAMESPACE)))
                .await
                .map_err(InvitationError::from)
                .and_then(|rows| require_row(rows, invitation_id)),
            Err(e) => Err(e),
        };

        if let Err(ref e) = result {
            error!(error = %e, "Failed to update invitation");
            return result;
        }

        info!("Invitation successfully updated");
        result
    }

    /// Sends invitations to join a team
    ///
    /// The account must exist, the batch must be well formed, and no invitee
    /// may already be a member. Membership checks for the whole batch run
    /// concurrently; the first failure aborts the batch before anything is
    /// written. All invitations are then stored in a single call.
    ///
    /// # Returns
    ///
    /// The stored invitations, including their tokens and expiry
    #[instrument(skip(self, invitations), fields(namespace = NAMESPACE, count = invitations.len()))]
    pub async fn send_invitations(
        &self,
        account_slug: &str,
        invitations: Vec<InvitationRequest>,
        invited_by: Option<UserId>,
    ) -> Result<Vec<Invitation>, InvitationError> {
        info!("Storing invitations...");

        let account = match self
            .port
            .find_account_by_slug(account_slug, Some(metadata(NAMESPACE)))
            .await
        {
            Ok(Some(account)) => account,
            Ok(None) => {
                error!("Account not found in database. Cannot send invitations.");
                return Err(InvitationError::AccountNotFound(account_slug.to_string()));
            }
            Err(e) => {
                error!(error = %e, "Failed to look up account");
                return Err(e.into());
            }
        };

        if let Err(e) = InvitationValidator::validate_batch(&invitations).into_result() {
            error!(error = %e, "Error validating invitations");
            return Err(e);
        }

        if let Err(e) = try_join_all(
            invitations
                .iter()
                .map(|invitation| self.validate_invitation(invitation, account_slug)),
        )
        .await
        {
            error!(error = %e, "Error validating invitations");
            return Err(e);
        }

        let created = match self
            .port
            .add_invitations_to_account(
                account_slug,
                &invitations,
                invited_by,
                Some(metadata_for(invited_by)),
            )
            .await
        {
            Ok(created) => created,
            Err(e) => {
                error!(error = %e, "Failed to add invitations to account {}", account_slug);
                return Err(e.into());
            }
        };

        info!(account_id = %account.id, count = created.len(), "Invitations added to account");
        Ok(created)
    }

    /// Accepts an invitation to join a team
    ///
    /// # Returns
    ///
    /// The id of the account the user joined
    ///
    /// # Errors
    ///
    /// `InvalidToken` if the token is blank, unknown, or expired
    #[instrument(skip(self, invite_token), fields(namespace = NAMESPACE))]
    pub async fn accept_invitation_to_team(
        &self,
        user_id: UserId,
        invite_token: &str,
    ) -> Result<AccountId, InvitationError> {
        info!("Accepting invitation to team");

        if invite_token.trim().is_empty() {
            error!("Failed to accept invitation to team: empty token");
            return Err(InvitationError::InvalidToken);
        }

        let result = self
            .port
            .accept_invitation(invite_token.trim(), user_id, Some(metadata_for(Some(user_id))))
            .await
            .map_err(|e| match e {
                PortError::Validation { .. } => InvitationError::InvalidToken,
                PortError::NotFound { ref entity_type, .. } if entity_type == "Invitation" => {
                    InvitationError::InvalidToken
                }
                other => InvitationError::from(other),
            });

        match result {
            Ok(account_id) => {
                info!(%account_id, "Successfully accepted invitation to team");
                Ok(account_id)
            }
            Err(e) => {
                error!(error = %e, "Failed to accept invitation to team");
                Err(e)
            }
        }
    }

    /// Renews an invitation by pushing its expiry seven days past now
    ///
    /// # Returns
    ///
    /// The new expiry timestamp
    #[instrument(skip(self), fields(namespace = NAMESPACE))]
    pub async fn renew_invitation(
        &self,
        invitation_id: InvitationId,
    ) -> Result<DateTime<Utc>, InvitationError> {
        info!("Renewing invitation...");

        let expires_at = Invitation::renewal_expiry(self.clock.now())?;

        let result = self
            .port
            .update_invitation_expiry(invitation_id, expires_at, Some(metadata(NAMESPACE)))
            .await
            .map_err(InvitationError::from)
            .and_then(|rows| require_row(rows, invitation_id));

        if let Err(e) = result {
            error!(error = %e, "Failed to renew invitation");
            return Err(e);
        }

        info!(expires_at = %expires_at.to_rfc3339(), "Invitation successfully renewed");
        Ok(expires_at)
    }

    /// Fails if the invitee already belongs to the account
    pub async fn validate_invitation(
        &self,
        invitation: &InvitationRequest,
        account_slug: &str,
    ) -> Result<(), InvitationError> {
        let members = self
            .port
            .get_account_members(account_slug, Some(metadata(NAMESPACE)))
            .await?;

        InvitationValidator::ensure_not_member(invitation, &members)
    }

    /// Lists the pending invitations of an account
    pub async fn list_invitations(&self, account_slug: &str) -> Result<Vec<Invitation>, InvitationError> {
        self.port
            .list_invitations(account_slug, Some(metadata(NAMESPACE)))
            .await
            .map_err(|e| not_found_as_account(e, account_slug))
    }

    /// Lists the members of an account
    pub async fn list_members(&self, account_slug: &str) -> Result<Vec<AccountMember>, InvitationError> {
        self.port
            .get_account_members(account_slug, Some(metadata(NAMESPACE)))
            .await
            .map_err(|e| not_found_as_account(e, account_slug))
    }
}

fn metadata(namespace: &str) -> OperationMetadata {
    OperationMetadata::for_namespace(namespace)
}

fn metadata_for(actor: Option<UserId>) -> OperationMetadata {
    match actor {
        Some(user_id) => metadata(NAMESPACE).initiated_by(user_id.to_string()),
        None => metadata(NAMESPACE),
    }
}

fn require_row(rows: u64, invitation_id: InvitationId) -> Result<(), InvitationError> {
    if rows == 0 {
        Err(InvitationError::InvitationNotFound(invitation_id))
    } else {
        Ok(())
    }
}

fn not_found_as_account(error: PortError, account_slug: &str) -> InvitationError {
    match error {
        PortError::NotFound { ref entity_type, .. } if entity_type == "Account" => {
            InvitationError::AccountNotFound(account_slug.to_string())
        }
        other => other.into(),
    }
}
