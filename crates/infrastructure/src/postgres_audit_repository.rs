use async_trait::async_trait;
use orgdesk_application::{EditAuditEvent, EditAuditRepository};
use orgdesk_core::{AppError, AppResult};
use sqlx::PgPool;

/// PostgreSQL-backed append-only audit repository for edit-lock events.
#[derive(Clone)]
pub struct PostgresAuditRepository {
    pool: PgPool,
}

impl PostgresAuditRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl EditAuditRepository for PostgresAuditRepository {
    async fn append_event(&self, event: EditAuditEvent) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO edit_audit_entries (
                organization_id,
                subject,
                action,
                record_kind,
                record_id,
                lease_id,
                metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            "#,
        )
        .bind(event.organization_id.as_uuid())
        .bind(event.subject)
        .bind(event.action.as_str())
        .bind(event.target.kind.as_str())
        .bind(event.target.record_id)
        .bind(event.lease_id)
        .bind(event.metadata)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append audit event: {error}")))?;

        Ok(())
    }
}
