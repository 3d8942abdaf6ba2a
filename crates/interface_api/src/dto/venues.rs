//! Venue submission DTOs

use serde::Serialize;

use domain_venue::{VenueSubmission, WizardStep};

#[derive(Debug, Serialize)]
pub struct StepStatus {
    pub number: u8,
    pub title: &'static str,
    pub complete: bool,
    pub missing_fields: Vec<&'static str>,
}

#[derive(Debug, Serialize)]
pub struct SubmissionValidationResponse {
    pub complete: bool,
    /// Number of the first step with empty required fields
    pub first_incomplete_step: Option<u8>,
    pub steps: Vec<StepStatus>,
}

impl SubmissionValidationResponse {
    pub fn for_draft(draft: &VenueSubmission) -> Self {
        let steps: Vec<StepStatus> = WizardStep::ALL
            .iter()
            .map(|step| {
                let missing_fields = step.missing_fields(draft);
                StepStatus {
                    number: step.number(),
                    title: step.title(),
                    complete: missing_fields.is_empty(),
                    missing_fields,
                }
            })
            .collect();

        let first_incomplete_step = steps.iter().find(|s| !s.complete).map(|s| s.number);

        Self {
            complete: first_incomplete_step.is_none(),
            first_incomplete_step,
            steps,
        }
    }
}
