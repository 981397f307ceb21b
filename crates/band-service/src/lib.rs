//! # band-service
//!
//! Application layer: the band authorization workflow, account registration and
//! login, and the request/response DTOs shared with the HTTP layer.

pub mod dto;
pub mod services;

#[cfg(test)]
mod testing;

pub use services::{
    AccountService, BandService, ServiceContext, ServiceContextBuilder, ServiceError,
    ServiceResult,
};
