use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Clone, FromRow)]
pub struct MemberModel {
    pub id: i64,
    pub band_id: i64,
    pub account_id: i64,
    /// `member` or `admin`, enforced by a CHECK constraint
    pub role: String,
    pub joined_at: DateTime<Utc>,
}
