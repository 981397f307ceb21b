//! Account entity - an authenticated identity

use chrono::{DateTime, Utc};

use crate::value_objects::Snowflake;

/// Avatar assigned to accounts that never uploaded one
pub const DEFAULT_AVATAR_URL: &str =
    "https://res.cloudinary.com/r4kta/image/upload/v1653796384/playliter/avatar/sample_capr2m.jpg";

/// Platform role given at registration. Unrelated to band roles.
pub const DEFAULT_ACCOUNT_ROLE: &str = "player";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Account {
    pub id: Snowflake,
    pub email: String,
    pub username: String,
    pub name: String,
    pub avatar: String,
    pub role: String,
    pub is_email_valid: bool,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    pub fn new(id: Snowflake, email: String, username: String, name: String) -> Self {
        let now = Utc::now();
        Self {
            id,
            email,
            username,
            name,
            avatar: DEFAULT_AVATAR_URL.to_string(),
            role: DEFAULT_ACCOUNT_ROLE.to_string(),
            is_email_valid: false,
            is_active: true,
            created_at: now,
            updated_at: now,
        }
    }

    /// Inactive accounts keep their data but cannot act
    #[inline]
    pub fn can_act(&self) -> bool {
        self.is_active
    }
}
