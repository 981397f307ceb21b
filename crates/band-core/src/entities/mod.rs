//! Domain entities

mod account;
mod band;
mod invitation;
mod member;

pub use account::{Account, DEFAULT_ACCOUNT_ROLE, DEFAULT_AVATAR_URL};
pub use band::{Band, DEFAULT_LOGO_URL};
pub use invitation::{Invitation, InvitationStatus};
pub use member::{Member, MemberRole};
