use band_core::{Band, DomainError, Member, Snowflake};

use crate::models::{BandModel, MemberModel};

/// Assemble a band from its row and its roster rows
///
/// # Errors
/// Fails if a member row carries an unknown role
pub fn band_with_members(model: BandModel, members: Vec<MemberModel>) -> Result<Band, DomainError> {
    let members = members
        .into_iter()
        .map(Member::try_from)
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Band {
        id: Snowflake::new(model.id),
        title: model.title,
        description: model.description,
        logo: model.logo,
        owner_id: Snowflake::new(model.owner_id),
        members,
        created_at: model.created_at,
        updated_at: model.updated_at,
    })
}
