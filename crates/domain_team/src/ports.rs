//! Team Accounts Ports
//!
//! This module defines the port the invitation service talks to. Two
//! adapters implement it:
//!
//! - **Postgres Adapter** (`infra_db`): tables plus the RPC functions
//! - **Mock Adapter**: in-memory, for tests without a database
//!
//! # Usage
//!
//! ```rust,ignore
//! use domain_team::ports::TeamAccountsPort;
//! use std::sync::Arc;
//!
//! let port: Arc<dyn TeamAccountsPort> = Arc::new(PostgresTeamAccountsAdapter::new(pool));
//! let members = port.get_account_members("acme", None).await?;
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use core_kernel::{
    AccountId, InvitationId, UserId, PortError, DomainPort, OperationMetadata, HealthCheckable,
};

use crate::account::Account;
use crate::invitation::{Invitation, InvitationRequest};
use crate::member::AccountMember;

/// The port trait for team account storage
///
/// Mutations that target a single invitation return the number of rows they
/// touched so callers can tell a missing row apart from a failure.
#[async_trait]
pub trait TeamAccountsPort: DomainPort + HealthCheckable {
    /// Looks up an account by slug
    async fn find_account_by_slug(
        &self,
        slug: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Option<Account>, PortError>;

    /// Lists the members of an account (`get_account_members`)
    async fn get_account_members(
        &self,
        account_slug: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<AccountMember>, PortError>;

    /// Lists the pending invitations of an account
    async fn list_invitations(
        &self,
        account_slug: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Invitation>, PortError>;

    /// Inserts a batch of invitations in one call (`add_invitations_to_account`)
    async fn add_invitations_to_account(
        &self,
        account_slug: &str,
        invitations: &[InvitationRequest],
        invited_by: Option<UserId>,
        metadata: Option<OperationMetadata>,
    ) -> Result<Vec<Invitation>, PortError>;

    /// Deletes an invitation by id
    async fn delete_invitation(
        &self,
        id: InvitationId,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError>;

    /// Sets the role of an invitation
    async fn update_invitation_role(
        &self,
        id: InvitationId,
        role: &str,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError>;

    /// Sets the expiry of an invitation
    async fn update_invitation_expiry(
        &self,
        id: InvitationId,
        expires_at: DateTime<Utc>,
        metadata: Option<OperationMetadata>,
    ) -> Result<u64, PortError>;

    /// Turns an invitation into a membership (`accept_invitation`)
    ///
    /// Returns the id of the account the user joined.
    async fn accept_invitation(
        &self,
        token: &str,
        user_id: UserId,
        metadata: Option<OperationMetadata>,
    ) -> Result<AccountId, PortError>;
}

/// Mock implementation of TeamAccountsPort for testing
///
/// Keeps accounts, users, memberships, and invitations in memory. Individual
/// operations can be told to fail so callers can exercise error paths.
#[cfg(any(test, feature = "mock"))]
pub mod mock {
    use super::*;
    use std::collections::{HashMap, HashSet};
    use std::sync::Arc;
    use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
    use tokio::sync::RwLock;
    use uuid::Uuid;

    use core_kernel::HealthCheckResult;

    /// Port operations that can be forced to fail
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub enum PortOperation {
        FindAccount,
        GetMembers,
        ListInvitations,
        AddInvitations,
        DeleteInvitation,
        UpdateRole,
        UpdateExpiry,
        AcceptInvitation,
    }

    #[derive(Debug, Clone)]
    struct StoredUser {
        email: String,
        name: Option<String>,
    }

    #[derive(Debug, Clone)]
    struct StoredMembership {
        account_id: AccountId,
        user_id: UserId,
        role: String,
        created_at: DateTime<Utc>,
    }

    /// In-memory mock implementation of TeamAccountsPort
    #[derive(Debug, Default)]
    pub struct MockTeamAccountsPort {
        accounts: Arc<RwLock<HashMap<String, Account>>>,
        users: Arc<RwLock<HashMap<UserId, StoredUser>>>,
        memberships: Arc<RwLock<Vec<StoredMembership>>>,
        invitations: Arc<RwLock<Vec<Invitation>>>,
        failing: Arc<RwLock<HashSet<PortOperation>>>,
        next_invitation_id: AtomicI64,
        member_lookups: AtomicUsize,
    }

    impl MockTeamAccountsPort {
        /// Creates a new mock port
        pub fn new() -> Self {
            Self::default()
        }

        /// Adds an account
        pub async fn with_account(self, account: Account) -> Self {
            self.accounts.write().await.insert(account.slug.clone(), account);
            self
        }

        /// Adds a user and makes them a member of the account with `slug`
        ///
        /// # Panics
        ///
        /// Panics if no account with `slug` was added first.
        pub async fn with_member(self, slug: &str, email: &str, role: &str) -> Self {
            let user_id = self.register_user(email).await;
            let account_id = self
                .accounts
                .read()
                .await
                .get(slug)
                .map(|a| a.id)
                .expect("account must be added before its members");
            self.memberships.write().await.push(StoredMembership {
                account_id,
                user_id,
                role: role.to_string(),
                created_at: Utc::now(),
            });
            self
        }

        /// Registers a user without any membership and returns their id
        pub async fn register_user(&self, email: &str) -> UserId {
            let user_id = UserId::new();
            self.users.write().await.insert(
                user_id,
                StoredUser {
                    email: email.to_string(),
                    name: email.split('@').next().map(str::to_string),
                },
            );
            user_id
        }

        /// Inserts an invitation as-is
        pub async fn with_invitation(self, invitation: Invitation) -> Self {
            self.next_invitation_id
                .fetch_max(invitation.id.value(), Ordering::SeqCst);
            self.invitations.write().await.push(invitation);
            self
        }

        /// Makes every later call of `operation` fail with a connection error
        pub async fn fail_on(&self, operation: PortOperation) {
            self.failing.write().await.insert(operation);
        }

        /// Returns a snapshot of the stored invitations
        pub async fn invitations(&self) -> Vec<Invitation> {
            self.invitations.read().await.clone()
        }

        /// Returns how many times the member list was fetched
        pub fn member_lookups(&self) -> usize {
            self.member_lookups.load(Ordering::SeqCst)
        }

        async fn check(&self, operation: PortOperation) -> Result<(), PortError> {
            if self.failing.read().await.contains(&operation) {
                return Err(PortError::connection(format!(
                    "simulated failure in {:?}",
                    operation
                )));
            }
            Ok(())
        }

        async fn account_id(&self, slug: &str) -> Result<AccountId, PortError> {
            self.accounts
                .read()
                .await
                .get(slug)
                .map(|a| a.id)
                .ok_or_else(|| PortError::not_found("Account", slug))
        }
    }

    impl DomainPort for MockTeamAccountsPort {}

    #[async_trait]
    impl HealthCheckable for MockTeamAccountsPort {
        async fn health_check(&self) -> HealthCheckResult {
            HealthCheckResult::healthy("mock-team-accounts-port", std::time::Duration::ZERO)
        }
    }

    #[async_trait]
    impl TeamAccountsPort for MockTeamAccountsPort {
        async fn find_account_by_slug(
            &self,
            slug: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Option<Account>, PortError> {
            self.check(PortOperation::FindAccount).await?;
            Ok(self.accounts.read().await.get(slug).cloned())
        }

        async fn get_account_members(
            &self,
            account_slug: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<AccountMember>, PortError> {
            self.member_lookups.fetch_add(1, Ordering::SeqCst);
            self.check(PortOperation::GetMembers).await?;
            let account_id = self.account_id(account_slug).await?;

            let users = self.users.read().await;
            let members = self
                .memberships
                .read()
                .await
                .iter()
                .filter(|m| m.account_id == account_id)
                .filter_map(|m| {
                    users.get(&m.user_id).map(|user| AccountMember {
                        user_id: m.user_id,
                        account_id: m.account_id,
                        email: user.email.clone(),
                        name: user.name.clone(),
                        role_hierarchy_level: if m.role == crate::roles::OWNER { 1 } else { 2 },
                        role: m.role.clone(),
                        created_at: m.created_at,
                    })
                })
                .collect();
            Ok(members)
        }

        async fn list_invitations(
            &self,
            account_slug: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Invitation>, PortError> {
            self.check(PortOperation::ListInvitations).await?;
            let account_id = self.account_id(account_slug).await?;
            Ok(self
                .invitations
                .read()
                .await
                .iter()
                .filter(|i| i.account_id == account_id)
                .cloned()
                .collect())
        }

        async fn add_invitations_to_account(
            &self,
            account_slug: &str,
            invitations: &[InvitationRequest],
            invited_by: Option<UserId>,
            _metadata: Option<OperationMetadata>,
        ) -> Result<Vec<Invitation>, PortError> {
            self.check(PortOperation::AddInvitations).await?;
            let account_id = self.account_id(account_slug).await?;
            let now = Utc::now();

            let mut stored = self.invitations.write().await;
            let mut created = Vec::with_capacity(invitations.len());
            for request in invitations {
                let email = request.normalized_email();
                if stored.iter().any(|i| i.account_id == account_id && i.email == email) {
                    return Err(PortError::conflict(format!(
                        "Invitation for {} already exists",
                        email
                    )));
                }
                let id = self.next_invitation_id.fetch_add(1, Ordering::SeqCst) + 1;
                created.push(Invitation {
                    id: InvitationId::new(id),
                    email,
                    account_id,
                    role: request.role.clone(),
                    invite_token: Uuid::new_v4().simple().to_string(),
                    invited_by,
                    created_at: now,
                    updated_at: now,
                    expires_at: Invitation::renewal_expiry(now)
                        .map_err(|e| PortError::internal(e.to_string()))?,
                });
            }
            stored.extend(created.iter().cloned());
            Ok(created)
        }

        async fn delete_invitation(
            &self,
            id: InvitationId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<u64, PortError> {
            self.check(PortOperation::DeleteInvitation).await?;
            let mut stored = self.invitations.write().await;
            let before = stored.len();
            stored.retain(|i| i.id != id);
            Ok((before - stored.len()) as u64)
        }

        async fn update_invitation_role(
            &self,
            id: InvitationId,
            role: &str,
            _metadata: Option<OperationMetadata>,
        ) -> Result<u64, PortError> {
            self.check(PortOperation::UpdateRole).await?;
            let mut stored = self.invitations.write().await;
            match stored.iter_mut().find(|i| i.id == id) {
                Some(invitation) => {
                    invitation.role = role.to_string();
                    invitation.updated_at = Utc::now();
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn update_invitation_expiry(
            &self,
            id: InvitationId,
            expires_at: DateTime<Utc>,
            _metadata: Option<OperationMetadata>,
        ) -> Result<u64, PortError> {
            self.check(PortOperation::UpdateExpiry).await?;
            let mut stored = self.invitations.write().await;
            match stored.iter_mut().find(|i| i.id == id) {
                Some(invitation) => {
                    invitation.expires_at = expires_at;
                    invitation.updated_at = Utc::now();
                    Ok(1)
                }
                None => Ok(0),
            }
        }

        async fn accept_invitation(
            &self,
            token: &str,
            user_id: UserId,
            _metadata: Option<OperationMetadata>,
        ) -> Result<AccountId, PortError> {
            self.check(PortOperation::AcceptInvitation).await?;
            if !self.users.read().await.contains_key(&user_id) {
                return Err(PortError::not_found("User", user_id));
            }

            let mut stored = self.invitations.write().await;
            let position = stored
                .iter()
                .position(|i| i.invite_token == token && !i.is_expired_at(Utc::now()))
                .ok_or_else(|| PortError::validation("Invalid or expired invitation token"))?;
            let invitation = stored.remove(position);

            self.memberships.write().await.push(StoredMembership {
                account_id: invitation.account_id,
                user_id,
                role: invitation.role,
                created_at: Utc::now(),
            });
            Ok(invitation.account_id)
        }
    }
}
