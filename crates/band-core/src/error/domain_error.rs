//! Domain errors - the failure taxonomy of the band workflow

use thiserror::Error;

use crate::entities::InvitationStatus;
use crate::value_objects::Snowflake;

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Account not found: {0}")]
    AccountNotFound(Snowflake),

    #[error("Band not found: {0}")]
    BandNotFound(Snowflake),

    #[error("Band member not found: {0}")]
    MemberNotFound(Snowflake),

    #[error("Band invitation not found: {0}")]
    InvitationNotFound(Snowflake),

    // =========================================================================
    // Validation Errors
    // =========================================================================
    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid member role: {0}")]
    InvalidRole(String),

    #[error("Invalid invitation status: {0}")]
    InvalidStatus(String),

    #[error("An invitation can only be accepted or denied")]
    InvalidDecision,

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("Only the band owner can do this")]
    NotBandOwner,

    #[error("Only the band owner or an admin can do this")]
    MissingAuthority,

    #[error("Not a member of this band")]
    NotBandMember,

    #[error("This invitation was sent to another account")]
    NotInvitee,

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("Email already in use")]
    EmailAlreadyExists,

    #[error("Username already in use")]
    UsernameAlreadyExists,

    #[error("Invited account is already a band member")]
    AlreadyMember,

    #[error("Account was already invited. Please wait for a response from given account.")]
    AlreadyInvited,

    // =========================================================================
    // State Errors
    // =========================================================================
    #[error("Invitation was already {0}")]
    InvitationResolved(InvitationStatus),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            Self::AccountNotFound(_) => "UNKNOWN_ACCOUNT",
            Self::BandNotFound(_) => "UNKNOWN_BAND",
            Self::MemberNotFound(_) => "UNKNOWN_MEMBER",
            Self::InvitationNotFound(_) => "UNKNOWN_INVITATION",

            Self::ValidationError(_) => "VALIDATION_ERROR",
            Self::InvalidRole(_) => "INVALID_ROLE",
            Self::InvalidStatus(_) => "INVALID_STATUS",
            Self::InvalidDecision => "INVALID_DECISION",

            Self::NotBandOwner => "NOT_BAND_OWNER",
            Self::MissingAuthority => "MISSING_AUTHORITY",
            Self::NotBandMember => "NOT_BAND_MEMBER",
            Self::NotInvitee => "NOT_INVITEE",

            Self::EmailAlreadyExists => "EMAIL_ALREADY_EXISTS",
            Self::UsernameAlreadyExists => "USERNAME_ALREADY_EXISTS",
            Self::AlreadyMember => "ALREADY_MEMBER",
            Self::AlreadyInvited => "ALREADY_INVITED",

            Self::InvitationResolved(_) => "INVITATION_RESOLVED",

            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::AccountNotFound(_)
                | Self::BandNotFound(_)
                | Self::MemberNotFound(_)
                | Self::InvitationNotFound(_)
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::ValidationError(_)
                | Self::InvalidRole(_)
                | Self::InvalidStatus(_)
                | Self::InvalidDecision
        )
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NotBandOwner | Self::MissingAuthority | Self::NotBandMember | Self::NotInvitee
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::EmailAlreadyExists
                | Self::UsernameAlreadyExists
                | Self::AlreadyMember
                | Self::AlreadyInvited
        )
    }

    /// Check if the target exists but is in the wrong state for the request
    pub fn is_invalid_state(&self) -> bool {
        matches!(self, Self::InvitationResolved(_))
    }

    /// Check if the failure came from the store rather than from a rule
    pub fn is_store_failure(&self) -> bool {
        matches!(self, Self::DatabaseError(_) | Self::InternalError(_))
    }
}
