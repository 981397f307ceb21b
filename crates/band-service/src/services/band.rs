//! Band service
//!
//! The band authorization workflow. Every operation reloads the band and
//! re-derives the caller's authority from the roster; nothing is trusted from
//! the token beyond the account id.

use band_core::{
    Account, Band, DomainError, Invitation, InvitationStatus, Member, MemberRole, Paging,
    Snowflake,
};
use tracing::{debug, info, instrument};

use crate::dto::{
    BandResponse, CreateBandRequest, InvitationResponse, MemberResponse, RespondInviteRequest,
    UpdateBandRequest, UpdateMemberRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct BandService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> BandService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    async fn load_band(&self, band_id: Snowflake) -> ServiceResult<Band> {
        let band = self
            .ctx
            .band_repo()
            .find_by_id(band_id)
            .await?
            .ok_or(DomainError::BandNotFound(band_id))?;
        Ok(band)
    }

    /// A member of `band`; ids belonging to another band are not found here
    async fn load_member(&self, band: &Band, member_id: Snowflake) -> ServiceResult<Member> {
        let member = self
            .ctx
            .member_repo()
            .find_by_id(member_id)
            .await?
            .filter(|m| m.band_id == band.id)
            .ok_or(DomainError::MemberNotFound(member_id))?;
        Ok(member)
    }

    // ========================================================================
    // Bands
    // ========================================================================

    /// The caller becomes the owner and is not added to the roster
    #[instrument(skip(self, caller, request), fields(caller_id = %caller.id))]
    pub async fn create_band(
        &self,
        caller: &Account,
        request: CreateBandRequest,
    ) -> ServiceResult<BandResponse> {
        let band = Band::new(
            self.ctx.generate_id(),
            request.title,
            request.description,
            caller.id,
        )
        .with_logo(request.logo);

        self.ctx.band_repo().create(&band).await?;

        info!(band_id = %band.id, owner_id = %caller.id, "Band created successfully");

        Ok(BandResponse::from(&band))
    }

    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn get_band(&self, caller: &Account, band_id: Snowflake) -> ServiceResult<BandResponse> {
        let band = self.load_band(band_id).await?;
        band.ensure_can_view(caller.id)?;
        Ok(BandResponse::from(&band))
    }

    /// Bands the caller owns or plays in
    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn list_bands(
        &self,
        caller: &Account,
        paging: Paging,
    ) -> ServiceResult<Vec<BandResponse>> {
        let bands = self.ctx.band_repo().find_by_account(caller.id, paging).await?;
        Ok(bands.iter().map(BandResponse::from).collect())
    }

    #[instrument(skip(self, caller, request), fields(caller_id = %caller.id))]
    pub async fn update_band(
        &self,
        caller: &Account,
        band_id: Snowflake,
        request: UpdateBandRequest,
    ) -> ServiceResult<BandResponse> {
        let mut band = self.load_band(band_id).await?;
        band.ensure_authority(caller.id)?;

        if band.merge(request.title, request.description, request.logo) {
            self.ctx.band_repo().update(&band).await?;
            info!(band_id = %band.id, "Band updated successfully");
        } else {
            debug!(band_id = %band.id, "Band update changed nothing");
        }

        Ok(BandResponse::from(&band))
    }

    /// Owner only. Members and invitations go with the band.
    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn remove_band(&self, caller: &Account, band_id: Snowflake) -> ServiceResult<()> {
        let band = self.load_band(band_id).await?;
        band.ensure_owner(caller.id)?;

        self.ctx.band_repo().delete(band.id).await?;

        info!(band_id = %band.id, members = band.members.len(), "Band removed successfully");

        Ok(())
    }

    // ========================================================================
    // Invitations
    // ========================================================================

    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn invite_account(
        &self,
        caller: &Account,
        band_id: Snowflake,
        target_id: Snowflake,
    ) -> ServiceResult<InvitationResponse> {
        let band = self.load_band(band_id).await?;
        band.ensure_can_invite(caller.id, target_id)?;

        if self.ctx.account_repo().find_by_id(target_id).await?.is_none() {
            return Err(DomainError::AccountNotFound(target_id).into());
        }

        if self
            .ctx
            .invitation_repo()
            .find_pending(band.id, target_id)
            .await?
            .is_some()
        {
            return Err(DomainError::AlreadyInvited.into());
        }

        // The store's unique index still guards against a concurrent duplicate
        let invitation = Invitation::new(self.ctx.generate_id(), band.id, target_id);
        self.ctx.invitation_repo().create(&invitation).await?;

        info!(
            band_id = %band.id,
            invitation_id = %invitation.id,
            invited_id = %target_id,
            "Account invited successfully"
        );

        Ok(InvitationResponse::from(&invitation))
    }

    /// Accept or deny an invitation addressed to the caller
    #[instrument(skip(self, caller, request), fields(caller_id = %caller.id))]
    pub async fn respond_invite(
        &self,
        caller: &Account,
        band_id: Snowflake,
        invitation_id: Snowflake,
        request: RespondInviteRequest,
    ) -> ServiceResult<InvitationResponse> {
        let decision: InvitationStatus = request.status.parse()?;

        let mut invitation = self
            .ctx
            .invitation_repo()
            .find_pending_by_id(invitation_id)
            .await?
            .ok_or(DomainError::InvitationNotFound(invitation_id))?;

        invitation.respond(band_id, caller.id, decision)?;

        match invitation.status {
            InvitationStatus::Accepted => {
                let member = Member::new(self.ctx.generate_id(), band_id, caller.id);
                self.ctx
                    .unit_of_work()
                    .accept_invitation(&invitation, &member)
                    .await?;
                info!(
                    band_id = %band_id,
                    invitation_id = %invitation.id,
                    member_id = %member.id,
                    "Invitation accepted"
                );
            }
            _ => {
                self.ctx.invitation_repo().update(&invitation).await?;
                info!(band_id = %band_id, invitation_id = %invitation.id, "Invitation denied");
            }
        }

        Ok(InvitationResponse::from(&invitation))
    }

    /// Pending invitations addressed to the caller
    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn list_invitations(
        &self,
        caller: &Account,
        paging: Paging,
    ) -> ServiceResult<Vec<InvitationResponse>> {
        let invitations = self
            .ctx
            .invitation_repo()
            .find_pending_by_account(caller.id, paging)
            .await?;
        Ok(invitations.iter().map(InvitationResponse::from).collect())
    }

    // ========================================================================
    // Members
    // ========================================================================

    /// Change a member's role. Asking for the current role writes nothing.
    #[instrument(skip(self, caller, request), fields(caller_id = %caller.id))]
    pub async fn update_member(
        &self,
        caller: &Account,
        band_id: Snowflake,
        member_id: Snowflake,
        request: UpdateMemberRequest,
    ) -> ServiceResult<MemberResponse> {
        let role: MemberRole = request.role.parse()?;

        let band = self.load_band(band_id).await?;
        band.ensure_authority(caller.id)?;

        let mut member = self.load_member(&band, member_id).await?;

        if member.set_role(role) {
            self.ctx.member_repo().update(&member).await?;
            info!(band_id = %band.id, member_id = %member.id, role = %role, "Member role updated");
        } else {
            debug!(member_id = %member.id, role = %role, "Member already has this role");
        }

        Ok(MemberResponse::from(&member))
    }

    #[instrument(skip(self, caller), fields(caller_id = %caller.id))]
    pub async fn expel_member(
        &self,
        caller: &Account,
        band_id: Snowflake,
        member_id: Snowflake,
    ) -> ServiceResult<()> {
        let band = self.load_band(band_id).await?;
        band.ensure_authority(caller.id)?;

        let member = self.load_member(&band, member_id).await?;
        self.ctx.member_repo().delete(member.id).await?;

        info!(band_id = %band.id, member_id = %member.id, "Member expelled");

        Ok(())
    }
}
