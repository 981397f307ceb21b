//! Route handlers
//!
//! All HTTP request handlers organized by domain.

pub mod accounts;
pub mod auth;
pub mod bands;
pub mod health;
pub mod invites;
pub mod members;
