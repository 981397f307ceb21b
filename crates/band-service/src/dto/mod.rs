//! Request and response DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    CreateBandRequest, LoginRequest, RegisterRequest, RespondInviteRequest, UpdateBandRequest,
    UpdateMemberRequest,
};
pub use responses::{
    AccountResponse, AuthResponse, BandResponse, HealthResponse, InvitationResponse,
    MemberResponse, ReadinessResponse,
};
