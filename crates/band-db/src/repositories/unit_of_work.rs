//! Transactional writes spanning more than one table

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use band_core::{DomainError, Invitation, Member, RepoResult, UnitOfWork};

use super::error::{map_db_error, map_unique_violation};
use super::invitation::update_pending;

#[derive(Clone)]
pub struct PgUnitOfWork {
    pool: PgPool,
}

impl PgUnitOfWork {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitOfWork for PgUnitOfWork {
    #[instrument(skip(self, invitation, member), fields(invitation_id = %invitation.id, member_id = %member.id))]
    async fn accept_invitation(&self, invitation: &Invitation, member: &Member) -> RepoResult<()> {
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        // Status first: a concurrent responder makes this fail before the
        // member row is written.
        update_pending(&mut *tx, invitation).await?;

        sqlx::query(
            r"
            INSERT INTO members (id, band_id, account_id, role, joined_at)
            VALUES ($1, $2, $3, $4, $5)
            ",
        )
        .bind(member.id.into_inner())
        .bind(member.band_id.into_inner())
        .bind(member.account_id.into_inner())
        .bind(member.role.as_str())
        .bind(member.joined_at)
        .execute(&mut *tx)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
