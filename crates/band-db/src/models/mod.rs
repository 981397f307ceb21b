//! SQLx row models

mod account;
mod band;
mod invitation;
mod member;

pub use account::AccountModel;
pub use band::BandModel;
pub use invitation::InvitationModel;
pub use member::MemberModel;
