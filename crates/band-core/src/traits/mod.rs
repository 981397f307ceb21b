//! Ports implemented by the infrastructure layer

mod repositories;

pub use repositories::{
    AccountRepository, BandRepository, InvitationRepository, MemberRepository, Paging,
    RepoResult, UnitOfWork,
};
