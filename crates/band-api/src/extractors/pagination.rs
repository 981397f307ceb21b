//! Pagination extractor
//!
//! Offset paging from `?limit=&offset=`.

use axum::{
    async_trait,
    extract::{FromRequestParts, Query},
    http::request::Parts,
};
use band_core::Paging;
use serde::Deserialize;

use crate::response::ApiError;

/// Raw pagination query parameters
#[derive(Debug, Default, Deserialize)]
pub struct PaginationParams {
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

/// Validated pagination parameters
///
/// Contract for every paginated route:
/// - `limit` zero or missing returns the default page of 100
/// - `limit` above 100 is clamped to 100, not rejected, so a client asking
///   for more gets at most 100 items and pages on with `offset`
/// - a negative `limit` or `offset` is a 400 validation error
#[derive(Debug, Clone, Copy, Default)]
pub struct Pagination(pub Paging);

impl Pagination {
    pub fn paging(self) -> Paging {
        self.0
    }
}

impl TryFrom<PaginationParams> for Pagination {
    type Error = ApiError;

    fn try_from(params: PaginationParams) -> Result<Self, Self::Error> {
        if params.limit.is_some_and(|l| l < 0) {
            return Err(ApiError::invalid_query("'limit' must not be negative"));
        }
        if params.offset.is_some_and(|o| o < 0) {
            return Err(ApiError::invalid_query("'offset' must not be negative"));
        }

        Ok(Pagination(Paging::new(params.limit, params.offset)))
    }
}

#[async_trait]
impl<S> FromRequestParts<S> for Pagination
where
    S: Send + Sync,
{
    type Rejection = ApiError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Query(params) = Query::<PaginationParams>::from_request_parts(parts, state)
            .await
            .map_err(|e| ApiError::invalid_query(e.to_string()))?;

        Pagination::try_from(params)
    }
}
