//! Six-step venue submission wizard
//!
//! # Steps
//!
//! 1. Basic info: venue name, type, description, contact email
//! 2. Location: address, city, state, zip
//! 3. Features: capacity, square footage, at least one amenity
//! 4. Availability: at least one day, base price
//! 5. Photos: at least one photo
//! 6. Review: terms and listing agreements
//!
//! Text that is only whitespace counts as empty.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::error::VenueError;
use crate::submission::{VenueListing, VenueSubmission};

/// A step of the wizard
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    BasicInfo,
    Location,
    Features,
    Availability,
    Photos,
    Review,
}

impl WizardStep {
    pub const ALL: [WizardStep; 6] = [
        WizardStep::BasicInfo,
        WizardStep::Location,
        WizardStep::Features,
        WizardStep::Availability,
        WizardStep::Photos,
        WizardStep::Review,
    ];

    /// One-based position shown in the progress bar
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::BasicInfo => 1,
            WizardStep::Location => 2,
            WizardStep::Features => 3,
            WizardStep::Availability => 4,
            WizardStep::Photos => 5,
            WizardStep::Review => 6,
        }
    }

    pub fn from_number(number: u8) -> Option<Self> {
        Self::ALL.get(usize::from(number).checked_sub(1)?).copied()
    }

    pub fn title(&self) -> &'static str {
        match self {
            WizardStep::BasicInfo => "Basic Info",
            WizardStep::Location => "Location",
            WizardStep::Features => "Features",
            WizardStep::Availability => "Availability",
            WizardStep::Photos => "Photos",
            WizardStep::Review => "Review",
        }
    }

    pub fn next(&self) -> Option<Self> {
        Self::from_number(self.number() + 1)
    }

    pub fn previous(&self) -> Option<Self> {
        Self::from_number(self.number() - 1)
    }

    /// Names of the required fields of this step that are still empty
    pub fn missing_fields(&self, draft: &VenueSubmission) -> Vec<&'static str> {
        let checks: Vec<(&'static str, bool)> = match self {
            WizardStep::BasicInfo => vec![
                ("venueName", filled(&draft.venue_name)),
                ("venueType", filled(&draft.venue_type)),
                ("description", filled(&draft.description)),
                ("email", filled(&draft.email)),
            ],
            WizardStep::Location => vec![
                ("address", filled(&draft.address)),
                ("city", filled(&draft.city)),
                ("state", filled(&draft.state)),
                ("zip", filled(&draft.zip)),
            ],
            WizardStep::Features => vec![
                ("capacity", filled(&draft.capacity)),
                ("squareFootage", filled(&draft.square_footage)),
                ("amenities", any_filled(&draft.amenities)),
            ],
            WizardStep::Availability => vec![
                ("availableDays", any_filled(&draft.available_days)),
                ("basePrice", filled(&draft.base_price)),
            ],
            WizardStep::Photos => vec![("photos", any_filled(&draft.photos))],
            WizardStep::Review => vec![
                ("termsAgreed", draft.terms_agreed),
                ("listingAgreed", draft.listing_agreed),
            ],
        };

        checks
            .into_iter()
            .filter(|(_, ok)| !ok)
            .map(|(field, _)| field)
            .collect()
    }

    pub fn is_complete(&self, draft: &VenueSubmission) -> bool {
        self.missing_fields(draft).is_empty()
    }
}

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn any_filled(values: &[String]) -> bool {
    values.iter().any(|v| filled(v))
}

/// Wizard state: the draft being edited and the step being shown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionWizard {
    step: WizardStep,
    draft: VenueSubmission,
}

impl Default for SubmissionWizard {
    fn default() -> Self {
        Self::new(VenueSubmission::default())
    }
}

impl SubmissionWizard {
    /// Starts the wizard on the first step
    pub fn new(draft: VenueSubmission) -> Self {
        Self {
            step: WizardStep::BasicInfo,
            draft,
        }
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &VenueSubmission {
        &self.draft
    }

    pub fn draft_mut(&mut self) -> &mut VenueSubmission {
        &mut self.draft
    }

    /// Moves to the next step if the current one is complete
    ///
    /// On failure the wizard stays where it is.
    pub fn next(&mut self) -> Result<WizardStep, VenueError> {
        let missing = self.step.missing_fields(&self.draft);
        if !missing.is_empty() {
            debug!(step = self.step.number(), ?missing, "Wizard step incomplete");
            return Err(VenueError::IncompleteStep {
                step: self.step,
                missing,
            });
        }

        let next = self.step.next().ok_or(VenueError::NoFurtherStep)?;
        self.step = next;
        Ok(next)
    }

    /// Moves back one step; stays put on the first step
    pub fn previous(&mut self) -> WizardStep {
        if let Some(previous) = self.step.previous() {
            self.step = previous;
        }
        self.step
    }

    /// First step, in order, that still has empty required fields
    pub fn first_incomplete_step(&self) -> Option<WizardStep> {
        WizardStep::ALL
            .into_iter()
            .find(|step| !step.is_complete(&self.draft))
    }

    /// Submits the draft from the review step
    ///
    /// Every step is re-checked, so a draft edited after moving forward
    /// cannot be submitted with gaps.
    pub fn submit(&self) -> Result<VenueListing, VenueError> {
        if self.step != WizardStep::Review {
            return Err(VenueError::NotOnReviewStep { current: self.step });
        }

        if let Some(step) = self.first_incomplete_step() {
            return Err(VenueError::IncompleteStep {
                step,
                missing: step.missing_fields(&self.draft),
            });
        }

        let listing = self.draft.to_listing(Utc::now())?;
        info!(submission_id = %listing.id, venue = %listing.venue_name, "Venue submitted for review");
        Ok(listing)
    }
}
