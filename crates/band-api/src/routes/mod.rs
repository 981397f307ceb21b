//! Route definitions
//!
//! API routes are mounted under /api/v1; health checks and the banner sit at the root.

use axum::{
    routing::{get, patch, post},
    Router,
};

use crate::handlers::{accounts, auth, bands, health, invites, members};
use crate::state::AppState;

/// Create the main API router (health is exported separately)
pub fn create_router() -> Router<AppState> {
    Router::new().nest("/api/v1", api_v1_routes())
}

/// Banner and health checks, kept outside the rate limiter
pub fn health_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health::root))
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check))
}

fn api_v1_routes() -> Router<AppState> {
    Router::new()
        .merge(auth_routes())
        .merge(account_routes())
        .merge(band_routes())
        .merge(invite_routes())
}

fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
}

fn account_routes() -> Router<AppState> {
    Router::new().route("/accounts/@me", get(accounts::get_current_account))
}

fn band_routes() -> Router<AppState> {
    Router::new()
        .route("/bands", post(bands::create_band).get(bands::list_bands))
        .route(
            "/bands/:band_id",
            get(bands::get_band)
                .patch(bands::update_band)
                .delete(bands::remove_band),
        )
        // target_id is the account when inviting and the invitation when responding
        .route(
            "/bands/:band_id/invites/:target_id",
            post(invites::invite_account).patch(invites::respond_invite),
        )
        .route(
            "/bands/:band_id/members/:member_id",
            patch(members::update_member).delete(members::expel_member),
        )
}

fn invite_routes() -> Router<AppState> {
    Router::new().route("/invites", get(invites::list_invitations))
}
