//! Team account invitation handlers
//!
//! Mutations answer with the `{ "success": bool }` envelope. Successful
//! responses build it after the service call returns; failures get it from
//! [`ApiError`].

use axum::{extract::State, http::StatusCode, Json};
use validator::Validate;

use core_kernel::InvitationId;
use domain_team::{InvitationRequest, OperationOutcome};

use crate::auth::{permissions, AuthUser};
use crate::dto::invitations::*;
use crate::extract::{ApiJson, ApiPath};
use crate::{error::ApiError, AppState};

/// Lists the members of an account
pub async fn list_members(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Vec<MemberResponse>>, ApiError> {
    let members = state.invitations.list_members(&slug).await?;
    Ok(Json(members.into_iter().map(MemberResponse::from).collect()))
}

/// Lists the pending invitations of an account
pub async fn list_invitations(
    State(state): State<AppState>,
    _auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
) -> Result<Json<Vec<InvitationResponse>>, ApiError> {
    let invitations = state.invitations.list_invitations(&slug).await?;
    Ok(Json(invitations.into_iter().map(InvitationResponse::from).collect()))
}

/// Invites a batch of people to an account
pub async fn send_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(slug): ApiPath<String>,
    ApiJson(request): ApiJson<SendInvitationsRequest>,
) -> Result<(StatusCode, Json<SendInvitationsResponse>), ApiError> {
    auth.require(permissions::INVITES_MANAGE)?;
    request.validate()?;

    let invited_by = auth.user_id().ok();
    let batch: Vec<InvitationRequest> = request.invitations.into_iter().map(Into::into).collect();

    let created = state
        .invitations
        .send_invitations(&slug, batch, invited_by)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(SendInvitationsResponse {
            outcome: OperationOutcome::success(),
            invitations: created.into_iter().map(InvitationResponse::created).collect(),
        }),
    ))
}

/// Changes the role of an invitation
pub async fn update_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
    ApiJson(request): ApiJson<UpdateInvitationRequest>,
) -> Result<Json<OperationOutcome>, ApiError> {
    auth.require(permissions::INVITES_MANAGE)?;
    request.validate()?;

    state
        .invitations
        .update_invitation(InvitationId::new(id), &request.role)
        .await?;

    Ok(Json(OperationOutcome::success()))
}

/// Deletes an invitation
pub async fn delete_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<OperationOutcome>, ApiError> {
    auth.require(permissions::INVITES_MANAGE)?;

    state.invitations.delete_invitation(InvitationId::new(id)).await?;

    Ok(Json(OperationOutcome::success()))
}

/// Extends an invitation's expiry by a week from now
pub async fn renew_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiPath(id): ApiPath<i64>,
) -> Result<Json<RenewInvitationResponse>, ApiError> {
    auth.require(permissions::INVITES_MANAGE)?;

    let expires_at = state.invitations.renew_invitation(InvitationId::new(id)).await?;

    Ok(Json(RenewInvitationResponse {
        outcome: OperationOutcome::success(),
        expires_at,
    }))
}

/// Accepts an invitation on behalf of the authenticated user
pub async fn accept_invitation(
    State(state): State<AppState>,
    auth: AuthUser,
    ApiJson(request): ApiJson<AcceptInvitationRequest>,
) -> Result<Json<AcceptInvitationResponse>, ApiError> {
    request.validate()?;
    let user_id = auth.user_id()?;

    let account_id = state
        .invitations
        .accept_invitation_to_team(user_id, &request.invite_token)
        .await?;

    Ok(Json(AcceptInvitationResponse {
        outcome: OperationOutcome::success(),
        account_id: *account_id.as_uuid(),
    }))
}
