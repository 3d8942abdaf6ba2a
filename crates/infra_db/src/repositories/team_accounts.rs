//! Team accounts repository
//!
//! Reads and writes accounts, memberships, and invitations. Batch inserts,
//! member listing, and acceptance go through the SQL functions defined in
//! the schema so the database enforces their invariants.

use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::types::Json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::DatabaseError;

/// Row of the `accounts` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct AccountRow {
    pub id: Uuid,
    pub slug: String,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Row returned by `get_account_members`
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MemberRow {
    pub user_id: Uuid,
    pub account_id: Uuid,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    pub role_hierarchy_level: i32,
    pub created_at: DateTime<Utc>,
}

/// Row of the `invitations` table
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct InvitationRow {
    pub id: i64,
    pub email: String,
    pub account_id: Uuid,
    pub invited_by: Option<Uuid>,
    pub role: String,
    pub invite_token: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

/// One element of the JSON array passed to `add_invitations_to_account`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NewInvitation {
    pub email: String,
    pub role: String,
}

const INVITATION_COLUMNS: &str =
    "id, email, account_id, invited_by, role, invite_token, created_at, updated_at, expires_at";

/// Repository for team accounts and their invitations
#[derive(Debug, Clone)]
pub struct TeamAccountsRepository {
    pool: PgPool,
}

impl TeamAccountsRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Looks up an account by its URL slug
    pub async fn find_account_by_slug(&self, slug: &str) -> Result<Option<AccountRow>, DatabaseError> {
        let account = sqlx::query_as::<_, AccountRow>(
            "SELECT id, slug, name, created_at FROM accounts WHERE slug = $1",
        )
        .bind(slug)
        .fetch_optional(&self.pool)
        .await?;

        Ok(account)
    }

    /// Calls `get_account_members`
    ///
    /// # Errors
    ///
    /// `NoDataFound` if the slug does not name an account
    pub async fn get_account_members(&self, account_slug: &str) -> Result<Vec<MemberRow>, DatabaseError> {
        let members = sqlx::query_as::<_, MemberRow>(
            r#"
            SELECT user_id, account_id, email, name, role, role_hierarchy_level, created_at
            FROM get_account_members($1)
            "#,
        )
        .bind(account_slug)
        .fetch_all(&self.pool)
        .await?;

        Ok(members)
    }

    /// Lists the invitations of an account, newest first
    pub async fn list_invitations(&self, account_id: Uuid) -> Result<Vec<InvitationRow>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM invitations WHERE account_id = $1 ORDER BY created_at DESC, id DESC",
            INVITATION_COLUMNS
        );
        let invitations = sqlx::query_as::<_, InvitationRow>(&query)
            .bind(account_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(invitations)
    }

    /// Calls `add_invitations_to_account` with the whole batch
    pub async fn add_invitations_to_account(
        &self,
        account_slug: &str,
        invitations: &[NewInvitation],
        invited_by: Option<Uuid>,
    ) -> Result<Vec<InvitationRow>, DatabaseError> {
        let query = format!(
            "SELECT {} FROM add_invitations_to_account($1, $2, $3)",
            INVITATION_COLUMNS
        );
        let rows = sqlx::query_as::<_, InvitationRow>(&query)
            .bind(account_slug)
            .bind(Json(invitations))
            .bind(invited_by)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows)
    }

    /// Deletes an invitation, returning the number of rows removed
    pub async fn delete_invitation(&self, id: i64) -> Result<u64, DatabaseError> {
        let result = sqlx::query("DELETE FROM invitations WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Sets the role of an invitation
    pub async fn update_invitation_role(&self, id: i64, role: &str) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE invitations SET role = $2 WHERE id = $1")
            .bind(id)
            .bind(role)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Sets the expiry of an invitation
    pub async fn update_invitation_expiry(
        &self,
        id: i64,
        expires_at: DateTime<Utc>,
    ) -> Result<u64, DatabaseError> {
        let result = sqlx::query("UPDATE invitations SET expires_at = $2 WHERE id = $1")
            .bind(id)
            .bind(expires_at)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected())
    }

    /// Calls `accept_invitation` and returns the joined account id
    ///
    /// # Errors
    ///
    /// `Raised` if the token is unknown or expired
    pub async fn accept_invitation(&self, token: &str, user_id: Uuid) -> Result<Uuid, DatabaseError> {
        let account_id = sqlx::query_scalar::<_, Uuid>("SELECT accept_invitation($1, $2)")
            .bind(token)
            .bind(user_id)
            .fetch_one(&self.pool)
            .await?;

        Ok(account_id)
    }

    /// Round-trips a trivial query
    pub async fn ping(&self) -> Result<(), DatabaseError> {
        sqlx::query_scalar::<_, i32>("SELECT 1")
            .fetch_one(&self.pool)
            .await?;
        Ok(())
    }
}
