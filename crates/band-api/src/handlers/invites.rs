//! Invitation handlers

use axum::{
    extract::{Path, State},
    Json,
};
use band_service::dto::{InvitationResponse, RespondInviteRequest};
use band_service::BandService;

use crate::extractors::{AuthUser, BandTargetPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Invite an account to the band
///
/// POST /bands/{band_id}/invites/{account_id}
pub async fn invite_account(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandTargetPath>,
) -> ApiResult<Created<Json<InvitationResponse>>> {
    let band_id = path.band_id()?;
    let target_id = path.target_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let response = service.invite_account(&caller, band_id, target_id).await?;
    Ok(Created(Json(response)))
}

/// Accept or deny an invitation
///
/// PATCH /bands/{band_id}/invites/{invitation_id}
pub async fn respond_invite(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandTargetPath>,
    ValidatedJson(request): ValidatedJson<RespondInviteRequest>,
) -> ApiResult<Json<InvitationResponse>> {
    let band_id = path.band_id()?;
    let invitation_id = path.target_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let response = service
        .respond_invite(&caller, band_id, invitation_id, request)
        .await?;
    Ok(Json(response))
}

/// Pending invitations addressed to the caller
///
/// GET /invites
pub async fn list_invitations(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<InvitationResponse>>> {
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let invitations = service
        .list_invitations(&caller, pagination.paging())
        .await?;
    Ok(Json(invitations))
}
