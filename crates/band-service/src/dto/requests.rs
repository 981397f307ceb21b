//! Request DTOs
//!
//! Shape and length checks live here (`validator`). Enum-valued fields stay
//! strings and are parsed by the service so an unknown value maps to a typed
//! domain error.

use serde::Deserialize;
use validator::{Validate, ValidateUrl, ValidationError};

// ============================================================================
// Auth Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(email(message = "Invalid email format"))]
    pub email: String,

    #[validate(
        length(min = 3, max = 32, message = "Username must be 3-32 characters"),
        custom(function = "username_not_email")
    )]
    pub username: String,

    #[validate(length(min = 1, max = 64, message = "Name must be 1-64 characters"))]
    pub name: String,

    #[validate(length(min = 8, max = 72, message = "Password must be 8-72 characters"))]
    pub password: String,
}

/// Login accepts a username or an email, so a username must never look like one
fn username_not_email(value: &str) -> Result<(), ValidationError> {
    if value.contains('@') {
        Err(ValidationError::new("username").with_message("Username must not contain '@'".into()))
    } else {
        Ok(())
    }
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct LoginRequest {
    /// Either the username or the email address
    #[validate(length(min = 1, message = "Username or email is required"))]
    pub username_or_email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

// ============================================================================
// Band Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateBandRequest {
    #[validate(length(min = 2, max = 100, message = "Title must be 2-100 characters"))]
    pub title: String,

    #[validate(length(min = 8, max = 1000, message = "Description must be 8-1000 characters"))]
    pub description: String,

    #[validate(url(message = "Logo must be a URL"))]
    pub logo: Option<String>,
}

/// Partial update. Absent or empty fields keep their current value.
#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct UpdateBandRequest {
    #[validate(custom(function = "blank_or_title"))]
    pub title: Option<String>,

    #[validate(custom(function = "blank_or_description"))]
    pub description: Option<String>,

    #[validate(custom(function = "blank_or_url"))]
    pub logo: Option<String>,
}

fn blank_or_length(value: &str, min: usize, max: usize, message: &'static str) -> Result<(), ValidationError> {
    let len = value.chars().count();
    if value.is_empty() || (min..=max).contains(&len) {
        Ok(())
    } else {
        Err(ValidationError::new("length").with_message(message.into()))
    }
}

fn blank_or_title(value: &str) -> Result<(), ValidationError> {
    blank_or_length(value, 2, 100, "Title must be 2-100 characters")
}

fn blank_or_description(value: &str) -> Result<(), ValidationError> {
    blank_or_length(value, 8, 1000, "Description must be 8-1000 characters")
}

fn blank_or_url(value: &str) -> Result<(), ValidationError> {
    if value.is_empty() || value.validate_url() {
        Ok(())
    } else {
        Err(ValidationError::new("url").with_message("Logo must be a URL".into()))
    }
}

// ============================================================================
// Invitation / Member Requests
// ============================================================================

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct RespondInviteRequest {
    /// `accepted` or `denied`
    #[validate(length(min = 1, message = "Status is required"))]
    pub status: String,
}

#[derive(Debug, Clone, Deserialize, Validate)]
pub struct UpdateMemberRequest {
    /// `member` or `admin`
    #[validate(length(min = 1, message = "Role is required"))]
    pub role: String,
}
