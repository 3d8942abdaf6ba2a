//! Property-Based Test Generators
//!
//! Proptest strategies for invitation and venue data.

use domain_team::{roles, InvitationRequest};
use proptest::prelude::*;

/// Strategy for well-formed lower-case email addresses
pub fn email_strategy() -> impl Strategy<Value = String> {
    (
        "[a-z][a-z0-9_]{0,10}",
        "[a-z]{2,12}",
        prop::sample::select(vec!["com", "org", "net", "io", "events"]),
    )
        .prop_map(|(local, domain, tld)| format!("{}@{}.{}", local, domain, tld))
}

/// Strategy for the seeded role names
pub fn role_strategy() -> impl Strategy<Value = String> {
    prop_oneof![Just(roles::OWNER.to_string()), Just(roles::MEMBER.to_string())]
}

/// Strategy for text that is empty once trimmed
pub fn blank_text_strategy() -> impl Strategy<Value = String> {
    "[ \t\n]{0,6}"
}

/// Strategy for a single well-formed invitation request
pub fn invitation_request_strategy() -> impl Strategy<Value = InvitationRequest> {
    (email_strategy(), role_strategy()).prop_map(|(email, role)| InvitationRequest::new(email, role))
}

/// Strategy for a batch of requests with distinct emails
pub fn invitation_batch_strategy(max: usize) -> impl Strategy<Value = Vec<InvitationRequest>> {
    prop::collection::hash_map(email_strategy(), role_strategy(), 1..=max.max(1)).prop_map(|entries| {
        entries
            .into_iter()
            .map(|(email, role)| InvitationRequest::new(email, role))
            .collect()
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use domain_team::InvitationValidator;

    proptest! {
        #[test]
        fn generated_batches_pass_validation(batch in invitation_batch_strategy(6)) {
            let result = InvitationValidator::validate_batch(&batch);
            prop_assert!(result.is_valid, "{:?}", result.errors);
        }

        #[test]
        fn blank_text_trims_to_empty(text in blank_text_strategy()) {
            prop_assert!(text.trim().is_empty());
        }
    }
}
