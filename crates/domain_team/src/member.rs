//! Account membership model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use core_kernel::{AccountId, UserId};

/// Well-known role names seeded by the schema
pub mod roles {
    pub const OWNER: &str = "owner";
    pub const MEMBER: &str = "member";
}

/// One row of the `get_account_members` listing
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountMember {
    pub user_id: UserId,
    pub account_id: AccountId,
    pub email: String,
    pub name: Option<String>,
    pub role: String,
    /// Lower numbers rank higher; owners are level 1
    pub role_hierarchy_level: i32,
    pub created_at: DateTime<Utc>,
}

impl AccountMember {
    /// Returns true if this member is registered under `email`
    ///
    /// Email addresses compare case-insensitively.
    pub fn has_email(&self, email: &str) -> bool {
        self.email.trim().eq_ignore_ascii_case(email.trim())
    }

    pub fn is_owner(&self) -> bool {
        self.role == roles::OWNER
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn member(email: &str, role: &str) -> AccountMember {
        AccountMember {
            user_id: UserId::new(),
            account_id: AccountId::new(),
            email: email.to_string(),
            name: None,
            role: role.to_string(),
            role_hierarchy_level: 2,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_has_email_ignores_case_and_whitespace() {
        let m = member("Jo@Example.com", roles::MEMBER);
        assert!(m.has_email("jo@example.com"));
        assert!(m.has_email(" JO@EXAMPLE.COM "));
        assert!(!m.has_email("jo@example.org"));
    }

    #[test]
    fn test_is_owner() {
        assert!(member("a@b.co", roles::OWNER).is_owner());
        assert!(!member("a@b.co", roles::MEMBER).is_owner());
    }
}
