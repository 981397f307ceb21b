//! Repository traits (ports) - the store interface the workflow consumes
//!
//! Every method returns plain data. Lookups return `Option`, lists return
//! `Vec`, and nothing relies on change tracking: a mutation is always an
//! explicit call carrying the full intended state.

use async_trait::async_trait;

use crate::entities::{Account, Band, Invitation, Member};
use crate::error::DomainError;
use crate::value_objects::Snowflake;

/// Result type for repository operations
pub type RepoResult<T> = Result<T, DomainError>;

/// Limit/offset window for list queries
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paging {
    pub limit: i64,
    pub offset: i64,
}

impl Paging {
    pub const DEFAULT_LIMIT: i64 = 100;
    /// Largest page a caller can get; bigger requests are clamped, not refused
    pub const MAX_LIMIT: i64 = 100;

    /// A missing or non-positive limit means the default page size
    pub fn new(limit: Option<i64>, offset: Option<i64>) -> Self {
        let limit = match limit {
            Some(l) if l > 0 => l.min(Self::MAX_LIMIT),
            _ => Self::DEFAULT_LIMIT,
        };
        Self {
            limit,
            offset: offset.unwrap_or(0).max(0),
        }
    }
}

impl Default for Paging {
    fn default() -> Self {
        Self::new(None, None)
    }
}

// ============================================================================
// Account Repository
// ============================================================================

#[async_trait]
pub trait AccountRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Account>>;

    async fn find_by_email(&self, email: &str) -> RepoResult<Option<Account>>;

    /// Login accepts either identifier
    async fn find_by_username_or_email(&self, login: &str) -> RepoResult<Option<Account>>;

    async fn email_exists(&self, email: &str) -> RepoResult<bool>;

    async fn username_exists(&self, username: &str) -> RepoResult<bool>;

    async fn create(&self, account: &Account, password_hash: &str) -> RepoResult<()>;

    async fn get_password_hash(&self, id: Snowflake) -> RepoResult<Option<String>>;
}

// ============================================================================
// Band Repository
// ============================================================================

#[async_trait]
pub trait BandRepository: Send + Sync {
    /// Loads the band with its full member roster
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Band>>;

    /// Bands the account owns or belongs to, rosters included
    async fn find_by_account(&self, account_id: Snowflake, paging: Paging)
        -> RepoResult<Vec<Band>>;

    async fn create(&self, band: &Band) -> RepoResult<()>;

    /// Persists title, description and logo. The roster is not touched.
    async fn update(&self, band: &Band) -> RepoResult<()>;

    /// Deletes the band together with its members and invitations, atomically
    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Member Repository
// ============================================================================

#[async_trait]
pub trait MemberRepository: Send + Sync {
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>>;

    /// Plain insert. Joining through an invitation goes through
    /// `UnitOfWork::accept_invitation` instead.
    async fn create(&self, member: &Member) -> RepoResult<()>;

    async fn update(&self, member: &Member) -> RepoResult<()>;

    async fn delete(&self, id: Snowflake) -> RepoResult<()>;
}

// ============================================================================
// Invitation Repository
// ============================================================================

/// Lookups only ever see `pending` invitations; resolved ones are history.
#[async_trait]
pub trait InvitationRepository: Send + Sync {
    async fn find_pending_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>>;

    async fn find_pending(
        &self,
        band_id: Snowflake,
        invited_id: Snowflake,
    ) -> RepoResult<Option<Invitation>>;

    async fn find_pending_by_account(
        &self,
        invited_id: Snowflake,
        paging: Paging,
    ) -> RepoResult<Vec<Invitation>>;

    /// Fails with `AlreadyInvited` if a pending invitation for the same
    /// band and account already exists
    async fn create(&self, invitation: &Invitation) -> RepoResult<()>;

    /// Persists a status change. Only a pending row can be updated; a row
    /// that was resolved concurrently yields `InvitationResolved`.
    async fn update(&self, invitation: &Invitation) -> RepoResult<()>;
}

// ============================================================================
// Unit of Work
// ============================================================================

/// Multi-row writes that must commit or fail together
#[async_trait]
pub trait UnitOfWork: Send + Sync {
    /// Insert `member` and persist `invitation` (already moved to
    /// `accepted`) in one transaction
    async fn accept_invitation(&self, invitation: &Invitation, member: &Member) -> RepoResult<()>;
}
