use band_core::{DomainError, Invitation, InvitationStatus, Snowflake};

use crate::models::InvitationModel;

impl TryFrom<InvitationModel> for Invitation {
    type Error = DomainError;

    fn try_from(model: InvitationModel) -> Result<Self, Self::Error> {
        let status: InvitationStatus = model.status.parse().map_err(|_| {
            DomainError::DatabaseError(format!(
                "invitation {} has unknown status '{}'",
                model.id, model.status
            ))
        })?;

        Ok(Invitation {
            id: Snowflake::new(model.id),
            band_id: Snowflake::new(model.band_id),
            invited_id: Snowflake::new(model.invited_id),
            status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}
