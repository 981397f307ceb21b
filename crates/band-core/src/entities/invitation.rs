//! Invitation entity - an offer of membership and its state machine
//!
//! ```text
//! pending ──accept──▶ accepted
//!    └─────deny────▶ denied
//! ```
//! Only the invited account may move an invitation, and only out of
//! `pending`. Both resolved states are terminal.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::DomainError;
use crate::value_objects::Snowflake;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InvitationStatus {
    Pending,
    Accepted,
    Denied,
}

impl InvitationStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Accepted => "accepted",
            Self::Denied => "denied",
        }
    }

    #[inline]
    pub const fn is_terminal(self) -> bool {
        !matches!(self, Self::Pending)
    }
}

impl fmt::Display for InvitationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for InvitationStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "accepted" => Ok(Self::Accepted),
            "denied" => Ok(Self::Denied),
            other => Err(DomainError::InvalidStatus(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invitation {
    pub id: Snowflake,
    pub band_id: Snowflake,
    pub invited_id: Snowflake,
    pub status: InvitationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Invitation {
    pub fn new(id: Snowflake, band_id: Snowflake, invited_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            band_id,
            invited_id,
            status: InvitationStatus::Pending,
            created_at: now,
            updated_at: now,
        }
    }

    #[inline]
    pub fn is_pending(&self) -> bool {
        self.status == InvitationStatus::Pending
    }

    /// Resolve the invitation on behalf of `account_id`.
    ///
    /// `band_id` is the band named by the caller; an invitation that belongs
    /// to another band is reported as missing rather than forbidden so ids
    /// cannot be discovered across bands.
    ///
    /// On success the status is updated in place. Creating the member row
    /// for an acceptance is the caller's job and must happen in the same
    /// unit of work as persisting this status.
    pub fn respond(
        &mut self,
        band_id: Snowflake,
        account_id: Snowflake,
        decision: InvitationStatus,
    ) -> Result<(), DomainError> {
        if self.band_id != band_id {
            return Err(DomainError::InvitationNotFound(self.id));
        }
        if self.invited_id != account_id {
            return Err(DomainError::NotInvitee);
        }
        if self.status.is_terminal() {
            return Err(DomainError::InvitationResolved(self.status));
        }
        if !decision.is_terminal() {
            return Err(DomainError::InvalidDecision);
        }

        self.status = decision;
        self.updated_at = Utc::now();
        Ok(())
    }
}
