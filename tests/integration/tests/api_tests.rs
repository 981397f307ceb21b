//! API Integration Tests
//!
//! These tests require a running PostgreSQL instance and the environment
//! variables DATABASE_URL and JWT_SECRET. Without them every test returns early.
//!
//! Run with: cargo test -p integration-tests --test api_tests

use integration_tests::{
    assert_error, assert_json, assert_status, check_test_env, fixtures::*, TestServer,
};
use reqwest::StatusCode;

/// A band owned by a fresh account, plus that owner's session
async fn band_with_owner(server: &TestServer) -> (AuthResponse, BandResponse) {
    let owner = server.register().await.unwrap();
    let response = server
        .post_auth("/api/v1/bands", &owner.access_token, &CreateBandRequest::unique())
        .await
        .unwrap();
    let band: BandResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    (owner, band)
}

/// Invite `player` into `band` and accept; returns the band as the owner sees it
async fn join(
    server: &TestServer,
    owner: &AuthResponse,
    band: &BandResponse,
    player: &AuthResponse,
) -> BandResponse {
    let path = format!("/api/v1/bands/{}/invites/{}", band.id, player.account.id);
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let path = format!("/api/v1/bands/{}/invites/{}", band.id, invitation.id);
    let response = server
        .patch_auth(&path, &player.access_token, &RespondInviteRequest::accept())
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/bands/{}", band.id), &owner.access_token)
        .await
        .unwrap();
    assert_json(response, StatusCode::OK).await.unwrap()
}

// ============================================================================
// Health Check Tests
// ============================================================================

#[tokio::test]
async fn test_health_and_banner() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let response = server.get("/health/ready").await.unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let response = server.get("/").await.unwrap();
    let banner: serde_json::Value = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(banner["name"].is_string());
}

// ============================================================================
// Auth Tests
// ============================================================================

#[tokio::test]
async fn test_register_and_login() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let auth: AuthResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(auth.account.username, request.username);
    assert_eq!(auth.account.role, "player");
    assert_eq!(auth.token_type, "Bearer");

    // Email lookup ignores case
    let response = server
        .post("/api/v1/auth/login", &LoginRequest::from_register(&request))
        .await
        .unwrap();
    let login: AuthResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(login.account.id, auth.account.id);

    let response = server
        .get_auth("/api/v1/accounts/@me", &login.access_token)
        .await
        .unwrap();
    let me: AccountResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(me.email, request.email);
    assert!(me.is_active);
}

#[tokio::test]
async fn test_register_duplicate_email() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &request).await.unwrap();

    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    assert_error(response, StatusCode::CONFLICT, "EMAIL_ALREADY_EXISTS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_login_with_wrong_password() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest::unique();
    server.post("/api/v1/auth/register", &request).await.unwrap();

    let login = LoginRequest {
        username_or_email: request.username.clone(),
        password: "Wr0ngPassword".to_string(),
    };
    let response = server.post("/api/v1/auth/login", &login).await.unwrap();
    assert_error(response, StatusCode::UNAUTHORIZED, "INVALID_CREDENTIALS")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_register_validation_details() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let request = RegisterRequest {
        email: "not-an-email".to_string(),
        username: "ab".to_string(),
        name: "X".to_string(),
        password: "Metron0me".to_string(),
    };
    let response = server.post("/api/v1/auth/register", &request).await.unwrap();
    let body: serde_json::Value = assert_json(response, StatusCode::BAD_REQUEST).await.unwrap();
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    assert!(body["error"]["details"]["email"].is_array());
    assert!(body["error"]["details"]["username"].is_array());
}

// ============================================================================
// Band Tests
// ============================================================================

#[tokio::test]
async fn test_create_band_owner_is_not_a_member() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;

    assert_eq!(band.owner_id, owner.account.id);
    assert!(band.members.is_empty());
    assert!(!band.logo.is_empty());

    let response = server
        .get_auth("/api/v1/bands", &owner.access_token)
        .await
        .unwrap();
    let bands: Vec<BandResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(bands.iter().any(|b| b.id == band.id));
}

#[tokio::test]
async fn test_stranger_cannot_view_band() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (_, band) = band_with_owner(&server).await;
    let stranger = server.register().await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/bands/{}", band.id), &stranger.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_BAND_MEMBER")
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/bands/123", &stranger.access_token)
        .await
        .unwrap();
    assert_error(response, StatusCode::NOT_FOUND, "UNKNOWN_BAND")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_update_band_keeps_blank_fields() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;

    let update = UpdateBandRequest {
        title: Some("Renamed Band".to_string()),
        description: Some(String::new()),
        logo: None,
    };
    let response = server
        .patch_auth(&format!("/api/v1/bands/{}", band.id), &owner.access_token, &update)
        .await
        .unwrap();
    let updated: BandResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(updated.title, "Renamed Band");
    assert_eq!(updated.description, band.description);
    assert_eq!(updated.logo, band.logo);
}

#[tokio::test]
async fn test_only_owner_removes_band() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;
    let player = server.register().await.unwrap();
    let band = join(&server, &owner, &band, &player).await;

    // Promoted admins still cannot remove the band
    let member = band.member_for(&player.account.id).unwrap();
    let path = format!("/api/v1/bands/{}/members/{}", band.id, member.id);
    let response = server
        .patch_auth(&path, &owner.access_token, &UpdateMemberRequest::role("admin"))
        .await
        .unwrap();
    assert_status(response, StatusCode::OK).await.unwrap();

    let band_path = format!("/api/v1/bands/{}", band.id);
    let response = server.delete_auth(&band_path, &player.access_token).await.unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_BAND_OWNER")
        .await
        .unwrap();

    let response = server.delete_auth(&band_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    let response = server.get_auth(&band_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();
}

// ============================================================================
// Invitation Tests
// ============================================================================

#[tokio::test]
async fn test_invite_accept_flow() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;
    let player = server.register().await.unwrap();

    let path = format!("/api/v1/bands/{}/invites/{}", band.id, player.account.id);
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();
    assert_eq!(invitation.status, "pending");
    assert_eq!(invitation.invited_id, player.account.id);

    // A second pending invitation is refused
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "ALREADY_INVITED")
        .await
        .unwrap();

    let response = server
        .get_auth("/api/v1/invites", &player.access_token)
        .await
        .unwrap();
    let pending: Vec<InvitationResponse> = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].band_id, band.id);

    let respond_path = format!("/api/v1/bands/{}/invites/{}", band.id, invitation.id);
    let response = server
        .patch_auth(&respond_path, &player.access_token, &RespondInviteRequest::accept())
        .await
        .unwrap();
    let accepted: InvitationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(accepted.status, "accepted");

    // Answered invitations cannot be answered again
    let response = server
        .patch_auth(&respond_path, &player.access_token, &RespondInviteRequest::deny())
        .await
        .unwrap();
    assert_status(response, StatusCode::NOT_FOUND).await.unwrap();

    let response = server
        .get_auth(&format!("/api/v1/bands/{}", band.id), &player.access_token)
        .await
        .unwrap();
    let seen: BandResponse = assert_json(response, StatusCode::OK).await.unwrap();
    let member = seen.member_for(&player.account.id).unwrap();
    assert_eq!(member.role, "member");
    assert_eq!(seen.members.len(), 1);

    // Already on the roster
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_error(response, StatusCode::CONFLICT, "ALREADY_MEMBER")
        .await
        .unwrap();
}

#[tokio::test]
async fn test_deny_invitation_adds_nobody() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;
    let player = server.register().await.unwrap();

    let path = format!("/api/v1/bands/{}/invites/{}", band.id, player.account.id);
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    // Only the invitee may answer
    let respond_path = format!("/api/v1/bands/{}/invites/{}", band.id, invitation.id);
    let response = server
        .patch_auth(&respond_path, &owner.access_token, &RespondInviteRequest::accept())
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "NOT_INVITEE")
        .await
        .unwrap();

    let response = server
        .patch_auth(&respond_path, &player.access_token, &RespondInviteRequest::deny())
        .await
        .unwrap();
    let denied: InvitationResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(denied.status, "denied");

    let response = server
        .get_auth(&format!("/api/v1/bands/{}", band.id), &owner.access_token)
        .await
        .unwrap();
    let band: BandResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert!(band.members.is_empty());

    // A denied invitation does not block a new one
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    assert_status(response, StatusCode::CREATED).await.unwrap();
}

#[tokio::test]
async fn test_invalid_decision_is_rejected() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;
    let player = server.register().await.unwrap();

    let path = format!("/api/v1/bands/{}/invites/{}", band.id, player.account.id);
    let response = server
        .post_auth(&path, &owner.access_token, &serde_json::json!({}))
        .await
        .unwrap();
    let invitation: InvitationResponse = assert_json(response, StatusCode::CREATED).await.unwrap();

    let respond_path = format!("/api/v1/bands/{}/invites/{}", band.id, invitation.id);
    let response = server
        .patch_auth(
            &respond_path,
            &player.access_token,
            &RespondInviteRequest {
                status: "maybe".to_string(),
            },
        )
        .await
        .unwrap();
    assert_status(response, StatusCode::BAD_REQUEST).await.unwrap();
}

// ============================================================================
// Member Tests
// ============================================================================

#[tokio::test]
async fn test_member_role_and_expulsion() {
    if !check_test_env() {
        return;
    }

    let server = TestServer::start().await.expect("Failed to start server");
    let (owner, band) = band_with_owner(&server).await;
    let player = server.register().await.unwrap();
    let band = join(&server, &owner, &band, &player).await;
    let member = band.member_for(&player.account.id).unwrap();
    let member_path = format!("/api/v1/bands/{}/members/{}", band.id, member.id);

    // Plain members have no authority
    let response = server
        .patch_auth(&member_path, &player.access_token, &UpdateMemberRequest::role("admin"))
        .await
        .unwrap();
    assert_error(response, StatusCode::FORBIDDEN, "MISSING_AUTHORITY")
        .await
        .unwrap();

    let response = server
        .patch_auth(&member_path, &owner.access_token, &UpdateMemberRequest::role("owner"))
        .await
        .unwrap();
    assert_error(response, StatusCode::BAD_REQUEST, "INVALID_ROLE")
        .await
        .unwrap();

    let response = server
        .patch_auth(&member_path, &owner.access_token, &UpdateMemberRequest::role("admin"))
        .await
        .unwrap();
    let promoted: MemberResponse = assert_json(response, StatusCode::OK).await.unwrap();
    assert_eq!(promoted.role, "admin");

    let response = server.delete_auth(&member_path, &owner.access_token).await.unwrap();
    assert_status(response, StatusCode::NO_CONTENT).await.unwrap();

    // Gone from the roster, so the band is closed to them again
    let response = server
        .get_auth(&format!("/api/v1/bands/{}", band.id), &player.access_token)
        .await
        .unwrap();
    assert_status(response, StatusCode::FORBIDDEN).await.unwrap();
}
