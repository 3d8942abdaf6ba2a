//! Test Data Builders
//!
//! Builders for test data with sensible defaults. Tests set only the fields
//! they care about; names and emails are generated with `fake`.

use chrono::{DateTime, Utc};
use core_kernel::{AccountId, InvitationId, UserId};
use domain_team::{roles, AccountMember, Invitation, InvitationRequest, INVITATION_VALIDITY_DAYS};
use domain_venue::VenueSubmission;
use fake::faker::internet::en::SafeEmail;
use fake::faker::name::en::Name;
use fake::Fake;
use uuid::Uuid;

use crate::fixtures::TemporalFixtures;

/// Builder for stored invitations
pub struct InvitationBuilder {
    id: InvitationId,
    email: String,
    account_id: AccountId,
    role: String,
    invite_token: String,
    invited_by: Option<UserId>,
    created_at: DateTime<Utc>,
    expires_at: DateTime<Utc>,
}

impl Default for InvitationBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl InvitationBuilder {
    /// Creates a new builder with a random email and a week-long expiry
    pub fn new() -> Self {
        let created_at = TemporalFixtures::now();
        Self {
            id: InvitationId::new((1..i64::from(i32::MAX)).fake()),
            email: SafeEmail().fake::<String>().to_lowercase(),
            account_id: AccountId::new(),
            role: roles::MEMBER.to_string(),
            invite_token: Uuid::new_v4().simple().to_string(),
            invited_by: None,
            created_at,
            expires_at: created_at + chrono::Duration::days(INVITATION_VALIDITY_DAYS),
        }
    }

    pub fn with_id(mut self, id: i64) -> Self {
        self.id = InvitationId::new(id);
        self
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.email = email.into();
        self
    }

    pub fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.account_id = account_id;
        self
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = role.into();
        self
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.invite_token = token.into();
        self
    }

    pub fn invited_by(mut self, user_id: UserId) -> Self {
        self.invited_by = Some(user_id);
        self
    }

    /// Makes the invitation already expired relative to the fixture clock
    pub fn expired(mut self) -> Self {
        self.expires_at = self.created_at - chrono::Duration::hours(1);
        self
    }

    pub fn build(self) -> Invitation {
        Invitation {
            id: self.id,
            email: self.email,
            account_id: self.account_id,
            role: self.role,
            invite_token: self.invite_token,
            invited_by: self.invited_by,
            created_at: self.created_at,
            updated_at: self.created_at,
            expires_at: self.expires_at,
        }
    }
}

/// Builder for account members
pub struct AccountMemberBuilder {
    member: AccountMember,
}

impl Default for AccountMemberBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl AccountMemberBuilder {
    pub fn new() -> Self {
        Self {
            member: AccountMember {
                user_id: UserId::new(),
                account_id: AccountId::new(),
                email: SafeEmail().fake::<String>().to_lowercase(),
                name: Some(Name().fake()),
                role: roles::MEMBER.to_string(),
                role_hierarchy_level: 2,
                created_at: TemporalFixtures::now(),
            },
        }
    }

    pub fn with_email(mut self, email: impl Into<String>) -> Self {
        self.member.email = email.into();
        self
    }

    pub fn with_account_id(mut self, account_id: AccountId) -> Self {
        self.member.account_id = account_id;
        self
    }

    /// Makes the member an owner
    pub fn owner(mut self) -> Self {
        self.member.role = roles::OWNER.to_string();
        self.member.role_hierarchy_level = 1;
        self
    }

    pub fn build(self) -> AccountMember {
        self.member
    }
}

/// Generates a batch of invitation requests with distinct fake emails
pub fn fake_invitation_requests(count: usize) -> Vec<InvitationRequest> {
    (0..count)
        .map(|i| {
            let local: String = SafeEmail().fake();
            InvitationRequest::new(format!("{}.{}", i, local.to_lowercase()), roles::MEMBER)
        })
        .collect()
}

/// Builder for venue submission drafts
///
/// `new()` starts from a draft that passes every wizard step; the `without_*`
/// methods blank out one step's data.
pub struct VenueSubmissionBuilder {
    draft: VenueSubmission,
}

impl Default for VenueSubmissionBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl VenueSubmissionBuilder {
    pub fn new() -> Self {
        Self {
            draft: VenueSubmission {
                venue_name: format!("{} Hall", Name().fake::<String>()),
                venue_type: "Event Space".to_string(),
                description: "Flexible space for concerts and receptions".to_string(),
                email: SafeEmail().fake(),
                address: "400 Cleveland St".to_string(),
                city: "Clearwater".to_string(),
                state: "FL".to_string(),
                zip: "33755".to_string(),
                capacity: "220".to_string(),
                square_footage: "3200".to_string(),
                amenities: vec!["WiFi".to_string(), "Stage".to_string()],
                available_days: vec!["Saturday".to_string()],
                base_price: "250".to_string(),
                photos: vec!["main-room.jpg".to_string()],
                terms_agreed: true,
                listing_agreed: true,
                ..VenueSubmission::default()
            },
        }
    }

    /// Starts from an empty draft with only the defaults set
    pub fn empty() -> Self {
        Self {
            draft: VenueSubmission::default(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.draft.venue_name = name.into();
        self
    }

    pub fn without_location(mut self) -> Self {
        self.draft.address.clear();
        self.draft.city.clear();
        self.draft.state.clear();
        self.draft.zip.clear();
        self
    }

    pub fn without_photos(mut self) -> Self {
        self.draft.photos.clear();
        self
    }

    pub fn without_agreements(mut self) -> Self {
        self.draft.terms_agreed = false;
        self.draft.listing_agreed = false;
        self
    }

    pub fn build(self) -> VenueSubmission {
        self.draft
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_venue::WizardStep;

    #[test]
    fn test_invitation_builder_defaults() {
        let invitation = InvitationBuilder::new().build();
        assert_eq!(invitation.role, roles::MEMBER);
        assert_eq!(
            invitation.expires_at - invitation.created_at,
            chrono::Duration::days(7)
        );
        assert!(invitation.email.contains('@'));
    }

    #[test]
    fn test_expired_invitation() {
        let invitation = InvitationBuilder::new().expired().build();
        assert!(invitation.is_expired_at(TemporalFixtures::now()));
    }

    #[test]
    fn test_fake_requests_are_distinct() {
        let requests = fake_invitation_requests(5);
        let mut emails: Vec<_> = requests.iter().map(|r| r.normalized_email()).collect();
        emails.sort();
        emails.dedup();
        assert_eq!(emails.len(), 5);
    }

    #[test]
    fn test_venue_builder_drafts() {
        let complete = VenueSubmissionBuilder::new().build();
        assert!(WizardStep::ALL.iter().all(|step| step.is_complete(&complete)));

        let no_location = VenueSubmissionBuilder::new().without_location().build();
        assert!(!WizardStep::Location.is_complete(&no_location));
    }
}
