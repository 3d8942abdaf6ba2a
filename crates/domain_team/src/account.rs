//! Team account model

use serde::{Deserialize, Serialize};

use core_kernel::AccountId;

/// A team account that members and invitations belong to
///
/// Accounts are addressed by their URL slug in every public operation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Account {
    pub id: AccountId,
    pub slug: String,
    pub name: String,
}

impl Account {
    pub fn new(slug: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: AccountId::new(),
            slug: slug.into(),
            name: name.into(),
        }
    }
}
