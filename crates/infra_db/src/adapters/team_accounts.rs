//! PostgreSQL Team Accounts Adapter
//!
//! Implements `TeamAccountsPort` on top of [`TeamAccountsRepository`].
//!
//! # Error Handling
//!
//! Database errors are translated to `PortError` variants:
//! - `DuplicateEntry` -> `Conflict`
//! - `ForeignKeyViolation`, `ConstraintViolation`, `Raised` -> `Validation`
//! - `NotFound`, `NoDataFound` -> `NotFound`
//! - connection problems -> `Connection`
//! - everything else -> `Internal`
//!
//! Acceptance is the exception: its only foreign key left to break is the
//! accepting user, so a `ForeignKeyViolation` there is `NotFound("User")`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use core_kernel::{
    AccountId, DomainPort, HealthCheckResult, HealthCheckable, InvitationId,
    OperationMetadata, PortError, UserId,
};
use domain_team::{Account, AccountMember, Invitation, InvitationRequest, TeamAccountsPort};

use crate::error::DatabaseError;
use crate::repositories::team_accounts::{
    AccountRow, InvitationRow, MemberRow, NewInvitation, TeamAccountsRepository,
};

const ADAPTER_ID: &str = "postgres-team-accounts-adapter";

/// PostgreSQL-backed implementation of the TeamAccountsPort trait
#[derive(Debug, Clone)]
pub struct PostgresTeamAccountsAdapter {
    repository: TeamAccountsRepository,
}

impl PostgresTeamAccountsAdapter {
    pub fn new(pool: PgPool) -> Self {
        Self {
            repository: TeamAccountsRepository::new(pool),
        }
    }

    /// Returns a reference to the underlying repository
    pub fn repository(&self) -> &TeamAccountsRepository {
        &self.repository
    }

    async fn require_account(&self, slug: &str) -> Result<AccountRow, PortError> {
        self.repository
            .find_account_by_slug(slug)
            .await
            .map_err(db_to_port_error)?
            .ok_or_else(|| PortError::not_found("Account", slug))
    }
}

impl DomainPort for PostgresTeamAccountsAdapter {}

#[async_trait]
impl HealthCheckable for PostgresTeamAccountsAdapter {
    /// Performs `SELECT 1` to verify the pool is operational
    async fn health_check(&self) -> HealthCheckResult {
        let start = std::time::Instant::now();
        match self.repository.ping().await {
            Ok(()) => HealthCheckResult::healthy(ADAPTER_ID, start.elapsed()),
            Err(e) => HealthCheckResult::unhealthy(ADAPTER_ID, start.elapsed(), format!("Database error: {}", e)),
        }
    }
}

#[async_trait]
impl TeamAccountsPort for PostgresTeamAccountsAdapter {
    #[instrument(skip(self, _metadata))]
    async fn find_account_by_slug(
        &self,
        slug: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Option<Account>, PortError> {
        debug!("Looking up account");

        let row = self
            .repository
            .find_account_by_slug(slug)
            .await
            .map_err(db_to_port_error)?;

        Ok(row.map(row_to_account))
    }

    #[instrument(skip(self, _metadata))]
    async fn get_account_members(
        &self,
        account_slug: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<AccountMember>, PortError> {
        debug!("Fetching account members");

        let rows = self
            .repository
            .get_account_members(account_slug)
            .await
            .map_err(|e| account_scoped_error(e, account_slug))?;

        Ok(rows.into_iter().map(row_to_member).collect())
    }

    #[instrument(skip(self, _metadata))]
    async fn list_invitations(
        &self,
        account_slug: &str,
        _metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Invitation>, PortError> {
        let account = self.require_account(account_slug).await?;

        let rows = self
            .repository
            .list_invitations(account.id)
            .await
            .map_err(db_to_port_error)?;

        Ok(rows.into_iter().map(row_to_invitation).collect())
    }

    #[instrument(skip(self, invitations, metadata), fields(count = invitations.len(), actor = actor_of(&metadata)))]
    async fn add_invitations_to_account(
        &self,
        account_slug: &str,
        invitations: &[InvitationRequest],
        invited_by: Option<UserId>,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Invitation>, PortError> {
        debug!("Inserting invitation batch");

        let batch: Vec<NewInvitation> = invitations
            .iter()
            .map(|i| NewInvitation {
                email: i.normalized_email(),
                role: i.role.trim().to_string(),
            })
            .collect();

        let rows = self
            .repository
            .add_invitations_to_account(account_slug, &batch, invited_by.map(Into::into))
            .await
            .map_err(db_to_port_error)?;

        // The function inserts nothing when the slug matches no account
        if rows.is_empty() && !batch.is_empty() {
            return Err(PortError::not_found("Account", account_slug));
        }

        Ok(rows.into_iter().map(row_to_invitation).collect())
    }

    #[instrument(skip(self, metadata), fields(invitation_id = %id, actor = actor_of(&metadata)))]
    async fn delete_invitation(
        &self,
        id: InvitationId,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError> {
        self.repository
            .delete_invitation(id.value())
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self, metadata), fields(invitation_id = %id, actor = actor_of(&metadata)))]
    async fn update_invitation_role(
        &self,
        id: InvitationId,
        role: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError> {
        self.repository
            .update_invitation_role(id.value(), role)
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self, metadata), fields(invitation_id = %id, actor = actor_of(&metadata)))]
    async fn update_invitation_expiry(
        &self,
        id: InvitationId,
        expires_at: DateTime<Utc>,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError> {
        self.repository
            .update_invitation_expiry(id.value(), expires_at)
            .await
            .map_err(db_to_port_error)
    }

    #[instrument(skip(self, token, metadata), fields(user_id = %user_id, actor = actor_of(&metadata)))]
    async fn accept_invitation(
        &self,
        token: &str,
        user_id: UserId,
        metadata: Option<OperationMetadata>,
    ) -> Result<AccountId, PortError> {
        let account_id = self
            .repository
            .accept_invitation(token, user_id.into())
            .await
            .map_err(|e| acceptance_error(e, user_id))?;

        Ok(AccountId::from(account_id))
    }
}

fn actor_of(metadata: &Option<OperationMetadata>) -> &str {
    metadata.as_ref().map_or("-", OperationMetadata::actor)
}

/// Converts database errors to port errors
fn db_to_port_error(e: DatabaseError) -> PortError {
    match e {
        DatabaseError::DuplicateEntry(msg) => PortError::conflict(msg),
        DatabaseError::ForeignKeyViolation(msg)
        | DatabaseError::ConstraintViolation(msg)
        | DatabaseError::Raised(msg) => PortError::validation(msg),
        DatabaseError::NotFound(msg) | DatabaseError::NoDataFound(msg) => {
            PortError::not_found("Record", msg)
        }
        e if e.is_connection_error() => PortError::connection(e.to_string()),
        other => PortError::internal(other.to_string()),
    }
}

/// Like [`db_to_port_error`] but names the account for `no_data_found`
fn account_scoped_error(e: DatabaseError, account_slug: &str) -> PortError {
    match e {
        DatabaseError::NoDataFound(_) => PortError::not_found("Account", account_slug),
        other => db_to_port_error(other),
    }
}

/// Account and role come from the locked invitation row, so a broken
/// foreign key on acceptance can only be the user
fn acceptance_error(e: DatabaseError, user_id: UserId) -> PortError {
    match e {
        DatabaseError::ForeignKeyViolation(_) => PortError::not_found("User", user_id),
        other => db_to_port_error(other),
    }
}

fn row_to_account(row: AccountRow) -> Account {
    Account {
        id: AccountId::from(row.id),
        slug: row.slug,
        name: row.name,
    }
}

fn row_to_member(row: MemberRow) -> AccountMember {
    AccountMember {
        user_id: UserId::from(row.user_id),
        account_id: AccountId::from(row.account_id),
        email: row.email,
        name: row.name,
        role: row.role,
        role_hierarchy_level: row.role_hierarchy_level,
        created_at: row.created_at,
    }
}

fn row_to_invitation(row: InvitationRow) -> Invitation {
    Invitation {
        id: InvitationId::new(row.id),
        email: row.email,
        account_id: AccountId::from(row.account_id),
        role: row.role,
        invite_token: row.invite_token,
        invited_by: row.invited_by.map(UserId::from),
        created_at: row.created_at,
        updated_at: row.updated_at,
        expires_at: row.expires_at,
    }
}
