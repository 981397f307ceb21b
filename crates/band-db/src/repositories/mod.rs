//! PostgreSQL repositories

mod account;
mod band;
mod error;
mod invitation;
mod member;
mod unit_of_work;

pub use account::PgAccountRepository;
pub use band::PgBandRepository;
pub use invitation::PgInvitationRepository;
pub use member::PgMemberRepository;
pub use unit_of_work::PgUnitOfWork;
