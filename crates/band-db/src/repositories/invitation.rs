//! PostgreSQL implementation of `InvitationRepository`

use async_trait::async_trait;
use sqlx::{PgConnection, PgPool};
use tracing::instrument;

use band_core::{
    DomainError, Invitation, InvitationRepository, InvitationStatus, Paging, RepoResult, Snowflake,
};

use crate::models::InvitationModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgInvitationRepository {
    pool: PgPool,
}

impl PgInvitationRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Write a status change, guarded on the row still being pending.
///
/// Shared with the unit of work so the guard holds inside a transaction too.
pub(super) async fn update_pending(
    conn: &mut PgConnection,
    invitation: &Invitation,
) -> RepoResult<()> {
    let result = sqlx::query(
        r"
        UPDATE invitations
        SET status = $2, updated_at = $3
        WHERE id = $1 AND status = 'pending'
        ",
    )
    .bind(invitation.id.into_inner())
    .bind(invitation.status.as_str())
    .bind(invitation.updated_at)
    .execute(&mut *conn)
    .await
    .map_err(map_db_error)?;

    if result.rows_affected() > 0 {
        return Ok(());
    }

    // Lost a race with another responder, or the row is gone
    let current = sqlx::query_scalar::<_, String>(r"SELECT status FROM invitations WHERE id = $1")
        .bind(invitation.id.into_inner())
        .fetch_optional(&mut *conn)
        .await
        .map_err(map_db_error)?;

    match current {
        Some(status) => {
            let status: InvitationStatus = status
                .parse()
                .map_err(|_| DomainError::DatabaseError(format!("unknown status '{status}'")))?;
            Err(DomainError::InvitationResolved(status))
        }
        None => Err(DomainError::InvitationNotFound(invitation.id)),
    }
}

#[async_trait]
impl InvitationRepository for PgInvitationRepository {
    #[instrument(skip(self))]
    async fn find_pending_by_id(&self, id: Snowflake) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, band_id, invited_id, status, created_at, updated_at
            FROM invitations
            WHERE id = $1 AND status = 'pending'
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Invitation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending(
        &self,
        band_id: Snowflake,
        invited_id: Snowflake,
    ) -> RepoResult<Option<Invitation>> {
        let result = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, band_id, invited_id, status, created_at, updated_at
            FROM invitations
            WHERE band_id = $1 AND invited_id = $2 AND status = 'pending'
            ",
        )
        .bind(band_id.into_inner())
        .bind(invited_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Invitation::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_pending_by_account(
        &self,
        invited_id: Snowflake,
        paging: Paging,
    ) -> RepoResult<Vec<Invitation>> {
        let results = sqlx::query_as::<_, InvitationModel>(
            r"
            SELECT id, band_id, invited_id, status, created_at, updated_at
            FROM invitations
            WHERE invited_id = $1 AND status = 'pending'
            ORDER BY created_at DESC, id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(invited_id.into_inner())
        .bind(paging.limit)
        .bind(paging.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        results.into_iter().map(Invitation::try_from).collect()
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id))]
    async fn create(&self, invitation: &Invitation) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO invitations (id, band_id, invited_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            ",
        )
        .bind(invitation.id.into_inner())
        .bind(invitation.band_id.into_inner())
        .bind(invitation.invited_id.into_inner())
        .bind(invitation.status.as_str())
        .bind(invitation.created_at)
        .bind(invitation.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyInvited))?;

        Ok(())
    }

    #[instrument(skip(self, invitation), fields(invitation_id = %invitation.id, status = %invitation.status))]
    async fn update(&self, invitation: &Invitation) -> RepoResult<()> {
        let mut conn = self.pool.acquire().await.map_err(map_db_error)?;
        update_pending(&mut *conn, invitation).await
    }
}
