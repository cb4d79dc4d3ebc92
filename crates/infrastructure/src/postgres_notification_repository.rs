use async_trait::async_trait;
use orgdesk_application::{Notification, NotificationSink};
use orgdesk_core::{AppError, AppResult, OrganizationId};
use sqlx::PgPool;

/// PostgreSQL-backed notification sink appending to the in-app inbox table.
#[derive(Clone)]
pub struct PostgresNotificationRepository {
    pool: PgPool,
}

impl PostgresNotificationRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl NotificationSink for PostgresNotificationRepository {
    async fn deliver(
        &self,
        organization_id: OrganizationId,
        notification: Notification,
    ) -> AppResult<()> {
        sqlx::query(
            r#"
            INSERT INTO notifications (
                organization_id,
                recipient_subject,
                kind,
                title,
                message,
                metadata
            )
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(notification.recipient_subject)
        .bind(notification.kind.as_str())
        .bind(notification.title)
        .bind(notification.message)
        .bind(notification.metadata)
        .execute(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to append notification: {error}")))?;

        Ok(())
    }
}
