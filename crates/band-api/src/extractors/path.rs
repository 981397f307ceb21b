//! Path parameter extractors
//!
//! Ids arrive as strings and are parsed into snowflakes here so a malformed
//! id is a 400 rather than a 404.

use band_core::Snowflake;
use serde::Deserialize;

use crate::response::ApiError;

fn parse_id(raw: &str, name: &str) -> Result<Snowflake, ApiError> {
    raw.parse()
        .map_err(|_| ApiError::invalid_path(format!("Invalid {name} format")))
}

/// `/bands/:band_id`
#[derive(Debug, Deserialize)]
pub struct BandIdPath {
    pub band_id: String,
}

impl BandIdPath {
    pub fn band_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.band_id, "band_id")
    }
}

/// `/bands/:band_id/invites/:target_id`
///
/// The target is the invited account when inviting and the invitation when
/// responding.
#[derive(Debug, Deserialize)]
pub struct BandTargetPath {
    pub band_id: String,
    pub target_id: String,
}

impl BandTargetPath {
    pub fn band_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.band_id, "band_id")
    }

    pub fn target_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.target_id, "target_id")
    }
}

/// `/bands/:band_id/members/:member_id`
#[derive(Debug, Deserialize)]
pub struct BandMemberPath {
    pub band_id: String,
    pub member_id: String,
}

impl BandMemberPath {
    pub fn band_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.band_id, "band_id")
    }

    pub fn member_id(&self) -> Result<Snowflake, ApiError> {
        parse_id(&self.member_id, "member_id")
    }
}
