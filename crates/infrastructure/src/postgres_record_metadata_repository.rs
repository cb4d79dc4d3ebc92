use async_trait::async_trait;
use orgdesk_application::RecordMetadataRepository;
use orgdesk_core::{AppError, AppResult, OrganizationId};
use orgdesk_domain::{LeaseTarget, RecordKind};
use sqlx::PgPool;

/// PostgreSQL-backed read-only record summaries for message composition.
#[derive(Clone)]
pub struct PostgresRecordMetadataRepository {
    pool: PgPool,
}

impl PostgresRecordMetadataRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl RecordMetadataRepository for PostgresRecordMetadataRepository {
    async fn describe_record(
        &self,
        organization_id: OrganizationId,
        target: &LeaseTarget,
    ) -> AppResult<Option<String>> {
        match target.kind {
            RecordKind::Income | RecordKind::Expense => {
                let row = sqlx::query_as::<_, (String, String, String)>(
                    r#"
                    SELECT
                        amount::TEXT,
                        category,
                        to_char(occurred_on, 'YYYY-MM-DD')
                    FROM financial_transactions
                    WHERE organization_id = $1
                      AND id = $2
                      AND kind = $3
                    "#,
                )
                .bind(organization_id.as_uuid())
                .bind(target.record_id)
                .bind(target.kind.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to describe transaction: {error}"))
                })?;

                Ok(row.map(|(amount, category, occurred_on)| {
                    format!("{} of {amount} ({category}) on {occurred_on}", target.kind)
                }))
            }
            RecordKind::Pledge => {
                let row = sqlx::query_as::<_, (String, String)>(
                    r#"
                    SELECT
                        amount::TEXT,
                        to_char(due_on, 'YYYY-MM-DD')
                    FROM pledges
                    WHERE organization_id = $1
                      AND id = $2
                    "#,
                )
                .bind(organization_id.as_uuid())
                .bind(target.record_id)
                .fetch_optional(&self.pool)
                .await
                .map_err(|error| {
                    AppError::Internal(format!("failed to describe pledge: {error}"))
                })?;

                Ok(row.map(|(amount, due_on)| format!("pledge of {amount} due {due_on}")))
            }
        }
    }
}
