//! Row model -> domain entity conversions
//!
//! Enum columns are stored as text, so member and invitation rows go through
//! `TryFrom` and surface a corrupt value as a database error.

mod account;
mod band;
mod invitation;
mod member;

pub use band::band_with_members;
