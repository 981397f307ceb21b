use band_core::{DomainError, Member, MemberRole, Snowflake};

use crate::models::MemberModel;

impl TryFrom<MemberModel> for Member {
    type Error = DomainError;

    fn try_from(model: MemberModel) -> Result<Self, Self::Error> {
        let role: MemberRole = model.role.parse().map_err(|_| {
            DomainError::DatabaseError(format!(
                "member {} has unknown role '{}'",
                model.id, model.role
            ))
        })?;

        Ok(Member {
            id: Snowflake::new(model.id),
            band_id: Snowflake::new(model.band_id),
            account_id: Snowflake::new(model.account_id),
            role,
            joined_at: model.joined_at,
        })
    }
}
