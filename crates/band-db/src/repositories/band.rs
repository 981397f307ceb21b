//! PostgreSQL implementation of `BandRepository`

use std::collections::HashMap;

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use band_core::{Band, BandRepository, DomainError, Paging, RepoResult, Snowflake};

use crate::mappers::band_with_members;
use crate::models::{BandModel, MemberModel};

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgBandRepository {
    pool: PgPool,
}

impl PgBandRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Roster rows for a set of bands, grouped by band id
    async fn load_members(&self, band_ids: &[i64]) -> RepoResult<HashMap<i64, Vec<MemberModel>>> {
        let rows = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, band_id, account_id, role, joined_at
            FROM members
            WHERE band_id = ANY($1)
            ORDER BY joined_at
            ",
        )
        .bind(band_ids)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        let mut grouped: HashMap<i64, Vec<MemberModel>> = HashMap::new();
        for row in rows {
            grouped.entry(row.band_id).or_default().push(row);
        }
        Ok(grouped)
    }
}

#[async_trait]
impl BandRepository for PgBandRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Band>> {
        let result = sqlx::query_as::<_, BandModel>(
            r"
            SELECT id, title, description, logo, owner_id, created_at, updated_at
            FROM bands
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        let Some(model) = result else {
            return Ok(None);
        };

        let mut members = self.load_members(&[model.id]).await?;
        let roster = members.remove(&model.id).unwrap_or_default();
        band_with_members(model, roster).map(Some)
    }

    #[instrument(skip(self))]
    async fn find_by_account(
        &self,
        account_id: Snowflake,
        paging: Paging,
    ) -> RepoResult<Vec<Band>> {
        let models = sqlx::query_as::<_, BandModel>(
            r"
            SELECT b.id, b.title, b.description, b.logo, b.owner_id, b.created_at, b.updated_at
            FROM bands b
            WHERE b.owner_id = $1
               OR EXISTS (SELECT 1 FROM members m WHERE m.band_id = b.id AND m.account_id = $1)
            ORDER BY b.created_at DESC, b.id DESC
            LIMIT $2 OFFSET $3
            ",
        )
        .bind(account_id.into_inner())
        .bind(paging.limit)
        .bind(paging.offset)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        if models.is_empty() {
            return Ok(Vec::new());
        }

        let ids: Vec<i64> = models.iter().map(|m| m.id).collect();
        let mut members = self.load_members(&ids).await?;

        models
            .into_iter()
            .map(|model| {
                let roster = members.remove(&model.id).unwrap_or_default();
                band_with_members(model, roster)
            })
            .collect()
    }

    #[instrument(skip(self, band), fields(band_id = %band.id))]
    async fn create(&self, band: &Band) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO bands (id, title, description, logo, owner_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            ",
        )
        .bind(band.id.into_inner())
        .bind(&band.title)
        .bind(&band.description)
        .bind(&band.logo)
        .bind(band.owner_id.into_inner())
        .bind(band.created_at)
        .bind(band.updated_at)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            map_unique_violation(e, || {
                DomainError::InternalError(format!("duplicate band id {}", band.id))
            })
        })?;

        Ok(())
    }

    #[instrument(skip(self, band), fields(band_id = %band.id))]
    async fn update(&self, band: &Band) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE bands
            SET title = $2, description = $3, logo = $4, updated_at = $5
            WHERE id = $1
            ",
        )
        .bind(band.id.into_inner())
        .bind(&band.title)
        .bind(&band.description)
        .bind(&band.logo)
        .bind(band.updated_at)
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::BandNotFound(band.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        // Foreign keys cascade as well; deleting children explicitly keeps the
        // behaviour independent of how the schema was created.
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        sqlx::query(r"DELETE FROM invitations WHERE band_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        sqlx::query(r"DELETE FROM members WHERE band_id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        let result = sqlx::query(r"DELETE FROM bands WHERE id = $1")
            .bind(id.into_inner())
            .execute(&mut *tx)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            // Dropping the transaction rolls it back
            return Err(DomainError::BandNotFound(id));
        }

        tx.commit().await.map_err(map_db_error)?;

        Ok(())
    }
}
