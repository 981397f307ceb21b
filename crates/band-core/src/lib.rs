//! # band-core
//!
//! Domain layer: the band aggregate and its authority predicates, the invitation
//! state machine, the error taxonomy and the repository ports.
//! Nothing in here knows about HTTP or SQL.

pub mod entities;
pub mod error;
pub mod traits;
pub mod value_objects;

pub use entities::{
    Account, Band, Invitation, InvitationStatus, Member, MemberRole, DEFAULT_ACCOUNT_ROLE,
    DEFAULT_AVATAR_URL, DEFAULT_LOGO_URL,
};
pub use error::DomainError;
pub use traits::{
    AccountRepository, BandRepository, InvitationRepository, MemberRepository, Paging,
    RepoResult, UnitOfWork,
};
pub use value_objects::{Snowflake, SnowflakeGenerator, SnowflakeParseError};
