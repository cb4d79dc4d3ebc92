use async_trait::async_trait;
use orgdesk_application::AuthorizationRepository;
use orgdesk_core::{AppError, AppResult, OrganizationId};
use sqlx::PgPool;

/// PostgreSQL-backed privilege lookups over organization membership.
///
/// Privilege is derived from the member role at query time, never cached,
/// so reviewer fan-out always reflects current membership.
#[derive(Clone)]
pub struct PostgresAuthorizationRepository {
    pool: PgPool,
}

impl PostgresAuthorizationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuthorizationRepository for PostgresAuthorizationRepository {
    async fn subject_is_privileged(
        &self,
        organization_id: OrganizationId,
        subject: &str,
    ) -> AppResult<bool> {
        let privileged = sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1
                FROM organization_members
                WHERE organization_id = $1
                  AND subject = $2
                  AND role IN ('owner', 'admin')
            )
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(subject)
        .fetch_one(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to check member privilege: {error}"))
        })?;

        Ok(privileged)
    }

    async fn list_privileged_subjects(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<String>> {
        let subjects = sqlx::query_scalar::<_, String>(
            r#"
            SELECT subject
            FROM organization_members
            WHERE organization_id = $1
              AND role IN ('owner', 'admin')
            ORDER BY subject
            "#,
        )
        .bind(organization_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to list privileged members: {error}"))
        })?;

        Ok(subjects)
    }
}
