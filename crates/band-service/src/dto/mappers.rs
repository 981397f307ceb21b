//! Entity -> response conversions

use band_common::AccessToken;
use band_core::{Account, Band, Invitation, Member};

use super::responses::{
    AccountResponse, AuthResponse, BandResponse, InvitationResponse, MemberResponse,
};

impl From<&Account> for AccountResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.id.to_string(),
            name: account.name.clone(),
            username: account.username.clone(),
            email: account.email.clone(),
            avatar: account.avatar.clone(),
            role: account.role.clone(),
            is_email_valid: account.is_email_valid,
            is_active: account.is_active,
            created_at: account.created_at,
        }
    }
}

impl AuthResponse {
    pub fn new(token: AccessToken, account: &Account) -> Self {
        Self {
            access_token: token.access_token,
            token_type: token.token_type,
            expires_in: token.expires_in,
            account: AccountResponse::from(account),
        }
    }
}

impl From<&Member> for MemberResponse {
    fn from(member: &Member) -> Self {
        Self {
            id: member.id.to_string(),
            band_id: member.band_id.to_string(),
            account_id: member.account_id.to_string(),
            role: member.role.to_string(),
            joined_at: member.joined_at,
        }
    }
}

impl From<&Band> for BandResponse {
    fn from(band: &Band) -> Self {
        Self {
            id: band.id.to_string(),
            title: band.title.clone(),
            description: band.description.clone(),
            logo: band.logo.clone(),
            owner_id: band.owner_id.to_string(),
            members: band.members.iter().map(MemberResponse::from).collect(),
            created_at: band.created_at,
            updated_at: band.updated_at,
        }
    }
}

impl From<&Invitation> for InvitationResponse {
    fn from(invitation: &Invitation) -> Self {
        Self {
            id: invitation.id.to_string(),
            band_id: invitation.band_id.to_string(),
            invited_id: invitation.invited_id.to_string(),
            status: invitation.status.to_string(),
            created_at: invitation.created_at,
            updated_at: invitation.updated_at,
        }
    }
}
