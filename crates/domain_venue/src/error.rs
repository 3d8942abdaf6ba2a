//! Venue submission errors

use thiserror::Error;

use crate::wizard::WizardStep;

/// Errors raised while filling in or submitting a venue
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum VenueError {
    /// The current step still has empty required fields
    #[error("Step {} ({}) is incomplete, missing: {}", step.number(), step.title(), missing.join(", "))]
    IncompleteStep {
        step: WizardStep,
        missing: Vec<&'static str>,
    },

    /// Submit was attempted before reaching the review step
    #[error("Submission is only possible from the review step, currently on {}", current.title())]
    NotOnReviewStep { current: WizardStep },

    /// The review step is the last one
    #[error("Review is the final step")]
    NoFurtherStep,

    /// A filled-in field could not be interpreted
    #[error("Invalid {field}: {message}")]
    InvalidField {
        field: &'static str,
        message: String,
    },
}

impl VenueError {
    pub fn invalid_field(field: &'static str, message: impl Into<String>) -> Self {
        VenueError::InvalidField {
            field,
            message: message.into(),
        }
    }

    /// Returns the missing fields for an incomplete step, if any
    pub fn missing_fields(&self) -> &[&'static str] {
        match self {
            VenueError::IncompleteStep { missing, .. } => missing,
            _ => &[],
        }
    }
}
