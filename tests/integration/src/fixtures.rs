//! Test fixtures and data generators

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

static COUNTER: AtomicU64 = AtomicU64::new(1);

/// Unique across processes sharing one database
pub fn unique_suffix() -> String {
    let nanos = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos())
        .unwrap_or_default();
    format!(
        "{}{}{}",
        std::process::id(),
        nanos % 100_000,
        COUNTER.fetch_add(1, Ordering::SeqCst)
    )
}

#[derive(Debug, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub username: String,
    pub name: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn unique() -> Self {
        let suffix = unique_suffix();
        Self {
            email: format!("player{suffix}@example.com"),
            username: format!("p{suffix}"),
            name: "Session Player".to_string(),
            password: "Metron0me".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginRequest {
    pub username_or_email: String,
    pub password: String,
}

impl LoginRequest {
    pub fn from_register(reg: &RegisterRequest) -> Self {
        Self {
            username_or_email: reg.email.to_uppercase(),
            password: reg.password.clone(),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AccountResponse {
    pub id: String,
    pub username: String,
    pub email: String,
    pub role: String,
    pub is_active: bool,
}

#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub access_token: String,
    pub token_type: String,
    pub account: AccountResponse,
}

#[derive(Debug, Serialize)]
pub struct CreateBandRequest {
    pub title: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

impl CreateBandRequest {
    pub fn unique() -> Self {
        Self {
            title: format!("The Rehearsals {}", unique_suffix()),
            description: "Covers band playing Friday nights".to_string(),
            logo: None,
        }
    }
}

#[derive(Debug, Default, Serialize)]
pub struct UpdateBandRequest {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MemberResponse {
    pub id: String,
    pub band_id: String,
    pub account_id: String,
    pub role: String,
}

#[derive(Debug, Deserialize)]
pub struct BandResponse {
    pub id: String,
    pub title: String,
    pub description: String,
    pub logo: String,
    pub owner_id: String,
    pub members: Vec<MemberResponse>,
}

impl BandResponse {
    pub fn member_for(&self, account_id: &str) -> Option<&MemberResponse> {
        self.members.iter().find(|m| m.account_id == account_id)
    }
}

#[derive(Debug, Deserialize)]
pub struct InvitationResponse {
    pub id: String,
    pub band_id: String,
    pub invited_id: String,
    pub status: String,
}

#[derive(Debug, Serialize)]
pub struct RespondInviteRequest {
    pub status: String,
}

impl RespondInviteRequest {
    pub fn accept() -> Self {
        Self {
            status: "accepted".to_string(),
        }
    }

    pub fn deny() -> Self {
        Self {
            status: "denied".to_string(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct UpdateMemberRequest {
    pub role: String,
}

impl UpdateMemberRequest {
    pub fn role(role: &str) -> Self {
        Self {
            role: role.to_string(),
        }
    }
}
