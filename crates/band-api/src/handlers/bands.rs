//! Band handlers
//!
//! Endpoints for band CRUD.

use axum::{
    extract::{Path, State},
    Json,
};
use band_service::dto::{BandResponse, CreateBandRequest, UpdateBandRequest};
use band_service::BandService;

use crate::extractors::{AuthUser, BandIdPath, Pagination, ValidatedJson};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Create a band owned by the caller
///
/// POST /bands
pub async fn create_band(
    State(state): State<AppState>,
    auth: AuthUser,
    ValidatedJson(request): ValidatedJson<CreateBandRequest>,
) -> ApiResult<Created<Json<BandResponse>>> {
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let response = service.create_band(&caller, request).await?;
    Ok(Created(Json(response)))
}

/// List the bands the caller owns or plays in
///
/// GET /bands
pub async fn list_bands(
    State(state): State<AppState>,
    auth: AuthUser,
    pagination: Pagination,
) -> ApiResult<Json<Vec<BandResponse>>> {
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let bands = service.list_bands(&caller, pagination.paging()).await?;
    Ok(Json(bands))
}

/// Get band by ID
///
/// GET /bands/{band_id}
pub async fn get_band(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandIdPath>,
) -> ApiResult<Json<BandResponse>> {
    let band_id = path.band_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let response = service.get_band(&caller, band_id).await?;
    Ok(Json(response))
}

/// Update band details
///
/// PATCH /bands/{band_id}
pub async fn update_band(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandIdPath>,
    ValidatedJson(request): ValidatedJson<UpdateBandRequest>,
) -> ApiResult<Json<BandResponse>> {
    let band_id = path.band_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    let response = service.update_band(&caller, band_id, request).await?;
    Ok(Json(response))
}

/// Delete a band (owner only)
///
/// DELETE /bands/{band_id}
pub async fn remove_band(
    State(state): State<AppState>,
    auth: AuthUser,
    Path(path): Path<BandIdPath>,
) -> ApiResult<NoContent> {
    let band_id = path.band_id()?;
    let caller = auth.caller(&state).await?;
    let service = BandService::new(state.service_context());
    service.remove_band(&caller, band_id).await?;
    Ok(NoContent)
}
