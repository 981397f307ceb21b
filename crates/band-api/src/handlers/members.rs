//! Member handlers
//!
//! Role changes and expulsion. Both require owner or admin authority.

use axum::{
    extract::{Path, State},
    Json,
};
use band_service::dto::{MemberResponse, UpdateMemberRequest};
use band_service::BandService;

use crate::extractors::{AuthUser, BandMemberPath, ValidatedJson};
use crate::response::{ApiResult, NoContent};
use crate::state::AppState;

/// Change a member's role
///
/// PATCH /bands/{band_id}/members/{member_id}
pub async fn update_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandMemberPath>,
    ValidatedJson(request): ValidatedJson<UpdateMemberRequest>,
) -> ApiResult<Json<MemberResponse>> {
    let band_id = path.band_id()?;
    let member_id = path.member_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let response = service
        .update_member(&caller, band_id, member_id, request)
        .await?;
    Ok(Json(response))
}

/// Remove a member from the band
///
/// DELETE /bands/{band_id}/members/{member_id}
pub async fn expel_member(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandMemberPath>,
) -> ApiResult<NoContent> {
    let band_id = path.band_id()?;
    let member_id = path.member_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    service.expel_member(&caller, band_id, member_id).await?;
    Ok(NoContent)
}
