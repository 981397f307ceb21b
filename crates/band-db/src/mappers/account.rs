use band_core::{Account, Snowflake};

use crate::models::AccountModel;

impl From<AccountModel> for Account {
    fn from(model: AccountModel) -> Self {
        Account {
            id: Snowflake::new(model.id),
            email: model.email,
            username: model.username,
            name: model.name,
            avatar: model.avatar,
            role: model.role,
            is_email_valid: model.is_email_valid,
            is_active: model.is_active,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}
