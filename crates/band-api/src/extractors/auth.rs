//! Authentication extractor
//!
//! Extracts and validates the bearer token from the Authorization header.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::request::Parts,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use band_core::{Account, Snowflake};
use band_service::AccountService;

use crate::response::{ApiError, ApiResult};
use crate::state::AppState;

/// Account id taken from a valid access token
///
/// The token alone proves nothing about the account still existing; handlers
/// that act on bands call [`AuthUser::caller`] to load it.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub account_id: Snowflake,
}

impl AuthUser {
    pub fn new(account_id: Snowflake) -> Self {
        Self { account_id }
    }

    /// Load the live account behind the token
    pub async fn caller(&self, state: &AppState) -> ApiResult<Account> {
        let account = AccountService::new(state.service_context())
            .resolve_caller(self.account_id)
            .await?;
        Ok(account)
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| ApiError::MissingAuth)?;

        let app_state = AppState::from_ref(state);

        let claims = app_state.jwt_service().validate(bearer.token()).map_err(|e| {
            tracing::warn!(error = %e, "Rejected access token");
            ApiError::App(e)
        })?;

        let account_id = claims.account_id().map_err(|e| {
            tracing::warn!(error = %e, jti = %claims.jti, "Invalid account id in token");
            ApiError::App(e)
        })?;

        Ok(AuthUser::new(account_id))
    }
}
