//! Account service
//!
//! Registration, login, and turning a token subject back into a live account.

use band_common::{hash_password, validate_password_strength, verify_password, AppError};
use band_core::{Account, DomainError, Snowflake};
use tracing::{debug, info, instrument, warn};

use crate::dto::{AccountResponse, AuthResponse, LoginRequest, RegisterRequest};

use super::context::ServiceContext;
use super::error::ServiceResult;

pub struct AccountService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> AccountService<'a> {
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    #[instrument(skip(self, request), fields(username = %request.username, email = %request.email))]
    pub async fn register(&self, request: RegisterRequest) -> ServiceResult<AuthResponse> {
        validate_password_strength(&request.password)?;

        if self.ctx.account_repo().email_exists(&request.email).await? {
            return Err(DomainError::EmailAlreadyExists.into());
        }
        if self.ctx.account_repo().username_exists(&request.username).await? {
            return Err(DomainError::UsernameAlreadyExists.into());
        }

        let password_hash = hash_password(&request.password)?;

        let account = Account::new(
            self.ctx.generate_id(),
            request.email,
            request.username,
            request.name,
        );
        self.ctx.account_repo().create(&account, &password_hash).await?;

        info!(account_id = %account.id, "Account registered successfully");

        let token = self.ctx.jwt_service().issue(account.id)?;
        Ok(AuthResponse::new(token, &account))
    }

    #[instrument(skip(self, request), fields(login = %request.username_or_email))]
    pub async fn login(&self, request: LoginRequest) -> ServiceResult<AuthResponse> {
        let account = self
            .ctx
            .account_repo()
            .find_by_username_or_email(&request.username_or_email)
            .await?
            .ok_or_else(|| {
                warn!("Login failed: account not found");
                AppError::InvalidCredentials
            })?;

        let password_hash = self
            .ctx
            .account_repo()
            .get_password_hash(account.id)
            .await?
            .ok_or_else(|| {
                warn!(account_id = %account.id, "Login failed: no password hash");
                AppError::InvalidCredentials
            })?;

        if !verify_password(&request.password, &password_hash)? {
            warn!(account_id = %account.id, "Login failed: invalid password");
            return Err(AppError::InvalidCredentials.into());
        }

        if !account.can_act() {
            warn!(account_id = %account.id, "Login refused: account inactive");
            return Err(AppError::InactiveAccount.into());
        }

        info!(account_id = %account.id, "Account logged in successfully");

        let token = self.ctx.jwt_service().issue(account.id)?;
        Ok(AuthResponse::new(token, &account))
    }

    /// Load the account behind an authenticated request.
    ///
    /// A token can outlive its account, so this is checked on every call.
    #[instrument(skip(self))]
    pub async fn resolve_caller(&self, account_id: Snowflake) -> ServiceResult<Account> {
        let account = self
            .ctx
            .account_repo()
            .find_by_id(account_id)
            .await?
            .ok_or_else(|| {
                debug!("Token subject has no account");
                AppError::InvalidToken
            })?;

        if !account.can_act() {
            return Err(AppError::InactiveAccount.into());
        }
        Ok(account)
    }

    pub async fn current_account(&self, account_id: Snowflake) -> ServiceResult<AccountResponse> {
        let account = self.resolve_caller(account_id).await?;
        Ok(AccountResponse::from(&account))
    }
}
