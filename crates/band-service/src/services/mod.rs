//! Business logic services

pub mod account;
pub mod band;
pub mod context;
pub mod error;

pub use account::AccountService;
pub use band::BandService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
