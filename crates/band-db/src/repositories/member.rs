//! PostgreSQL implementation of `MemberRepository`

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use band_core::{DomainError, Member, MemberRepository, RepoResult, Snowflake};

use crate::models::MemberModel;

use super::error::{map_db_error, map_unique_violation};

#[derive(Clone)]
pub struct PgMemberRepository {
    pool: PgPool,
}

impl PgMemberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl MemberRepository for PgMemberRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: Snowflake) -> RepoResult<Option<Member>> {
        let result = sqlx::query_as::<_, MemberModel>(
            r"
            SELECT id, band_id, account_id, role, joined_at
            FROM members
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(Member::try_from).transpose()
    }

    #[instrument(skip(self, member), fields(member_id = %member.id))]
    async fn create(&self, member: &Member) -> RepoResult<()> {
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
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, || DomainError::AlreadyMember))?;

        Ok(())
    }

    #[instrument(skip(self, member), fields(member_id = %member.id, role = %member.role))]
    async fn update(&self, member: &Member) -> RepoResult<()> {
        let result = sqlx::query(r"UPDATE members SET role = $2 WHERE id = $1")
            .bind(member.id.into_inner())
            .bind(member.role.as_str())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(member.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn delete(&self, id: Snowflake) -> RepoResult<()> {
        let result = sqlx::query(r"DELETE FROM members WHERE id = $1")
            .bind(id.into_inner())
            .execute(&self.pool)
            .await
            .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::MemberNotFound(id));
        }

        Ok(())
    }
}
