//! Band aggregate - one owner plus a roster of members
//!
//! The owner never has a member row. Owner authority is implicit and is
//! strictly stronger than admin authority: both can manage the band, only
//! the owner can delete it.

use chrono::{DateTime, Utc};

use super::member::Member;
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Logo used when a band is created without one
pub const DEFAULT_LOGO_URL: &str =
    "https://res.cloudinary.com/r4kta/image/upload/v1663515679/playliter/logo/default_band_mklz55.png";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Band {
    pub id: Snowflake,
    pub title: String,
    pub description: String,
    pub logo: String,
    pub owner_id: Snowflake,
    pub members: Vec<Member>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Band {
    /// Create a band owned by `owner_id` with an empty roster
    pub fn new(id: Snowflake, title: String, description: String, owner_id: Snowflake) -> Self {
        let now = Utc::now();
        Self {
            id,
            title,
            description,
            logo: DEFAULT_LOGO_URL.to_string(),
            owner_id,
            members: Vec::new(),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn with_logo(mut self, logo: Option<String>) -> Self {
        if let Some(logo) = logo {
            self.logo = logo;
        }
        self
    }

    #[inline]
    pub fn is_owner(&self, account_id: Snowflake) -> bool {
        self.owner_id == account_id
    }

    /// The owner is not a member for this predicate
    pub fn is_member(&self, account_id: Snowflake) -> bool {
        self.member(account_id).is_some()
    }

    pub fn is_admin(&self, account_id: Snowflake) -> bool {
        self.member(account_id).is_some_and(Member::is_admin)
    }

    /// Owner or admin member. Gates every mutation except answering an invite.
    pub fn has_authority(&self, account_id: Snowflake) -> bool {
        self.is_owner(account_id) || self.is_admin(account_id)
    }

    /// Owner or any member may read the band
    pub fn can_view(&self, account_id: Snowflake) -> bool {
        self.is_owner(account_id) || self.is_member(account_id)
    }

    pub fn member(&self, account_id: Snowflake) -> Option<&Member> {
        self.members.iter().find(|m| m.account_id == account_id)
    }

    pub fn ensure_can_view(&self, account_id: Snowflake) -> Result<(), DomainError> {
        if self.can_view(account_id) {
            Ok(())
        } else {
            Err(DomainError::NotBandMember)
        }
    }

    pub fn ensure_authority(&self, account_id: Snowflake) -> Result<(), DomainError> {
        if self.has_authority(account_id) {
            Ok(())
        } else {
            Err(DomainError::MissingAuthority)
        }
    }

    pub fn ensure_owner(&self, account_id: Snowflake) -> Result<(), DomainError> {
        if self.is_owner(account_id) {
            Ok(())
        } else {
            Err(DomainError::NotBandOwner)
        }
    }

    /// Checks everything about a new invitation that the roster alone can answer.
    /// Whether a pending invitation already exists is the store's question.
    pub fn ensure_can_invite(
        &self,
        inviter_id: Snowflake,
        invited_id: Snowflake,
    ) -> Result<(), DomainError> {
        self.ensure_authority(inviter_id)?;
        if self.is_owner(invited_id) || self.is_member(invited_id) {
            return Err(DomainError::AlreadyMember);
        }
        Ok(())
    }

    /// Partial merge. Empty strings count as absent.
    /// Returns whether anything changed.
    pub fn merge(
        &mut self,
        title: Option<String>,
        description: Option<String>,
        logo: Option<String>,
    ) -> bool {
        let mut changed = false;

        if let Some(title) = title.filter(|t| !t.is_empty()) {
            if title != self.title {
                self.title = title;
                changed = true;
            }
        }

        if let Some(description) = description.filter(|d| !d.is_empty()) {
            if description != self.description {
                self.description = description;
                changed = true;
            }
        }

        if let Some(logo) = logo.filter(|l| !l.is_empty()) {
            if logo != self.logo {
                self.logo = logo;
                changed = true;
            }
        }

        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }
}
