//! Venue Submission Wizard Tests
//!
//! # Test Organization
//!
//! - `navigation` - next/previous movement and blocking
//! - `submission` - submit rules and parsing into a listing
//! - property tests for the blocking rule

use domain_venue::{PricingModel, SubmissionWizard, VenueError, VenueSubmission, WizardStep};
use proptest::prelude::*;
use rust_decimal_macros::dec;

// ============================================================================
// TEST FIXTURES
// ============================================================================

fn complete_draft() -> VenueSubmission {
    VenueSubmission {
        venue_name: "Harbor Loft".to_string(),
        venue_type: "Loft".to_string(),
        description: "Open-plan loft over the harbor".to_string(),
        email: "bookings@harborloft.test".to_string(),
        address: "12 Dock St".to_string(),
        city: "Clearwater".to_string(),
        state: "FL".to_string(),
        zip: "33755".to_string(),
        capacity: "150".to_string(),
        square_footage: "2,400".to_string(),
        amenities: vec!["WiFi".to_string(), "Sound System".to_string()],
        available_days: vec!["Friday".to_string(), "Saturday".to_string()],
        base_price: "$175".to_string(),
        photos: vec!["front.jpg".to_string()],
        terms_agreed: true,
        listing_agreed: true,
        ..VenueSubmission::default()
    }
}

fn wizard_on_review(draft: VenueSubmission) -> SubmissionWizard {
    let mut wizard = SubmissionWizard::new(draft);
    for _ in 0..5 {
        wizard.next().unwrap();
    }
    assert_eq!(wizard.step(), WizardStep::Review);
    wizard
}

mod navigation {
    use super::*;

    #[test]
    fn test_starts_on_basic_info() {
        let wizard = SubmissionWizard::default();
        assert_eq!(wizard.step(), WizardStep::BasicInfo);
        assert_eq!(wizard.step().number(), 1);
    }

    #[test]
    fn test_empty_draft_is_blocked_on_first_step() {
        let mut wizard = SubmissionWizard::default();

        let err = wizard.next().unwrap_err();

        assert_eq!(wizard.step(), WizardStep::BasicInfo);
        assert_eq!(
            err.missing_fields(),
            &["venueName", "venueType", "description", "email"]
        );
    }

    #[test]
    fn test_whitespace_counts_as_empty() {
        let mut draft = complete_draft();
        draft.city = "   ".to_string();
        let mut wizard = SubmissionWizard::new(draft);
        wizard.next().unwrap();

        let err = wizard.next().unwrap_err();

        assert_eq!(
            err,
            VenueError::IncompleteStep {
                step: WizardStep::Location,
                missing: vec!["city"],
            }
        );
        assert_eq!(wizard.step(), WizardStep::Location);
    }

    #[test]
    fn test_features_need_an_amenity() {
        let mut draft = complete_draft();
        draft.amenities.clear();
        let mut wizard = SubmissionWizard::new(draft);
        wizard.next().unwrap();
        wizard.next().unwrap();

        assert_eq!(wizard.next().unwrap_err().missing_fields(), &["amenities"]);
    }

    #[test]
    fn test_walks_through_every_step() {
        let mut wizard = SubmissionWizard::new(complete_draft());
        let visited: Vec<_> = (0..5).map(|_| wizard.next().unwrap()).collect();

        assert_eq!(visited, WizardStep::ALL[1..].to_vec());
        assert_eq!(wizard.next(), Err(VenueError::NoFurtherStep));
    }

    #[test]
    fn test_previous_stops_at_first_step() {
        let mut wizard = SubmissionWizard::new(complete_draft());
        wizard.next().unwrap();

        assert_eq!(wizard.previous(), WizardStep::BasicInfo);
        assert_eq!(wizard.previous(), WizardStep::BasicInfo);
    }

    #[test]
    fn test_step_numbering() {
        for (index, step) in WizardStep::ALL.iter().enumerate() {
            assert_eq!(usize::from(step.number()), index + 1);
            assert_eq!(WizardStep::from_number(step.number()), Some(*step));
        }
        assert_eq!(WizardStep::from_number(0), None);
        assert_eq!(WizardStep::from_number(7), None);
    }
}

mod submission {
    use super::*;

    #[test]
    fn test_submit_parses_listing() {
        let listing = wizard_on_review(complete_draft()).submit().unwrap();

        assert_eq!(listing.capacity, 150);
        assert_eq!(listing.square_footage, 2400);
        assert_eq!(listing.base_price, dec!(175));
        assert_eq!(listing.pricing_model, PricingModel::Hourly);
        assert_eq!(listing.minimum_hours, 4);
        assert_eq!(listing.opens_at.to_string(), "09:00:00");
        assert_eq!(listing.closes_at.to_string(), "23:00:00");
        assert_eq!(listing.phone, None);
        assert_eq!(listing.price_label(), "$175 per hour");
    }

    #[test]
    fn test_submit_requires_review_step() {
        let wizard = SubmissionWizard::new(complete_draft());

        assert_eq!(
            wizard.submit(),
            Err(VenueError::NotOnReviewStep {
                current: WizardStep::BasicInfo
            })
        );
    }

    #[test]
    fn test_submit_requires_both_agreements() {
        let mut wizard = wizard_on_review(complete_draft());
        wizard.draft_mut().listing_agreed = false;

        let err = wizard.submit().unwrap_err();

        assert_eq!(err.missing_fields(), &["listingAgreed"]);
    }

    #[test]
    fn test_submit_rechecks_earlier_steps() {
        let mut wizard = wizard_on_review(complete_draft());
        wizard.draft_mut().photos.clear();

        assert!(matches!(
            wizard.submit(),
            Err(VenueError::IncompleteStep { step: WizardStep::Photos, .. })
        ));
    }

    #[test]
    fn test_unparseable_capacity() {
        let mut draft = complete_draft();
        draft.capacity = "about a hundred".to_string();

        let err = wizard_on_review(draft).submit().unwrap_err();

        assert!(matches!(err, VenueError::InvalidField { field: "capacity", .. }));
    }

    #[test]
    fn test_first_incomplete_step() {
        let mut draft = complete_draft();
        draft.base_price = String::new();
        draft.photos.clear();

        let wizard = SubmissionWizard::new(draft);

        assert_eq!(wizard.first_incomplete_step(), Some(WizardStep::Availability));
    }
}

// ============================================================================
// PROPERTY TESTS
// ============================================================================

fn blank() -> impl Strategy<Value = String> {
    "[ \t]{0,4}"
}

proptest! {
    #[test]
    fn blank_required_text_always_blocks(step_number in 1u8..=4, pad in blank()) {
        let mut draft = complete_draft();
        match step_number {
            1 => draft.venue_name = pad,
            2 => draft.zip = pad,
            3 => draft.capacity = pad,
            _ => draft.base_price = pad,
        }
        let step = WizardStep::from_number(step_number).unwrap();
        let mut wizard = SubmissionWizard::new(draft);
        for _ in 1..step_number {
            wizard.next().unwrap();
        }

        prop_assert!(wizard.next().is_err());
        prop_assert_eq!(wizard.step(), step);
    }

    #[test]
    fn complete_draft_never_blocks(previous_presses in 0usize..3) {
        let mut wizard = SubmissionWizard::new(complete_draft());
        wizard.next().unwrap();
        wizard.next().unwrap();
        for _ in 0..previous_presses {
            wizard.previous();
        }
        while wizard.step() != WizardStep::Review {
            prop_assert!(wizard.next().is_ok());
        }
        prop_assert!(wizard.submit().is_ok());
    }
}
