use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Row of the `accounts` table, minus the password hash
#[derive(Debug, Clone, FromRow)]
pub struct AccountModel {
    pub id: i64,
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
