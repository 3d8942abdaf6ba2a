//! Venue Submission Domain
//!
//! Venue owners list a space through a six-step wizard: basic info,
//! location, features, availability and pricing, photos, and a final review
//! where both agreements must be accepted. Each step has required fields and
//! the wizard refuses to move past a step until they are filled in.
//!
//! A completed draft is converted into a typed [`VenueListing`] on submit,
//! which is where free-text numbers and times are parsed.

pub mod error;
pub mod submission;
pub mod wizard;

pub use error::VenueError;
pub use submission::{PricingModel, VenueListing, VenueSubmission};
pub use wizard::{SubmissionWizard, WizardStep};
