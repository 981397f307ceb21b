//! Account handlers

use axum::{extract::State, Json};
use band_service::dto::AccountResponse;
use band_service::AccountService;

use crate::extractors::AuthUser;
use crate::response::ApiResult;
use crate::state::AppState;

/// Get the authenticated account
///
/// GET /accounts/@me
pub async fn get_current_account(
    State(state): State<AppState>,
    auth: AuthUser,
) -> ApiResult<Json<AccountResponse>> {
    let service = AccountService::new(state.service_context());
    let response = service.current_account(auth.account_id).await?;
    Ok(Json(response))
}
