//! Venue submission handlers

use axum::Json;
use chrono::Utc;

use domain_venue::VenueSubmission;

use crate::auth::AuthUser;
use crate::dto::venues::SubmissionValidationResponse;
use crate::error::ApiError;
use crate::extract::ApiJson;

/// Reports which wizard steps of a draft are complete
///
/// A draft whose steps are all filled in is also parsed, so malformed
/// numbers or times surface as a 422 before submission.
pub async fn validate_submission(
    _auth: AuthUser,
    ApiJson(draft): ApiJson<VenueSubmission>,
) -> Result<Json<SubmissionValidationResponse>, ApiError> {
    let report = SubmissionValidationResponse::for_draft(&draft);
    if report.complete {
        draft.to_listing(Utc::now())?;
    }
    Ok(Json(report))
}
