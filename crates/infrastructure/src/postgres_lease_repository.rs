use std::str::FromStr;

use async_trait::async_trait;
use orgdesk_application::{CreateLeaseInput, Lease, LeaseRepository};
use orgdesk_core::{AppError, AppResult, OrganizationId};
use orgdesk_domain::{LeaseStatus, LeaseTarget, RecordKind};
use sqlx::PgPool;
use uuid::Uuid;


/// PostgreSQL-backed edit lease repository.
///
/// The one-active-lease-per-target invariant is enforced by a partial
/// unique index over active statuses; the insert is optimistic and a
/// constraint violation is mapped to a conflict. The mutation statements
/// re-check the required source status in their predicates, so a lost race
/// surfaces as zero returned rows.
#[derive(Clone)]
pub struct PostgresLeaseRepository {
    pool: PgPool,
}

impl PostgresLeaseRepository {
    /// Creates a repository with the provided connection pool.
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(sqlx::FromRow)]
struct LeaseRow {
    id: Uuid,
    organization_id: Uuid,
    record_kind: String,
    record_id: Uuid,
    requester_subject: String,
    reason: String,
    status: String,
    reviewer_subject: Option<String>,
    reviewer_note: Option<String>,
    reviewed_at: Option<String>,
    created_at: String,
}

impl LeaseRow {
    fn into_lease(self) -> AppResult<Lease> {
        let kind = RecordKind::from_str(self.record_kind.as_str()).map_err(|_| {
            AppError::Internal(format!(
                "unknown record kind '{}' stored for lease '{}'",
                self.record_kind, self.id
            ))
        })?;
        let status = LeaseStatus::from_str(self.status.as_str()).map_err(|_| {
            AppError::Internal(format!(
                "unknown lease status '{}' stored for lease '{}'",
                self.status, self.id
            ))
        })?;

        Ok(Lease {
            lease_id: self.id,
            organization_id: OrganizationId::from_uuid(self.organization_id),
            target: LeaseTarget::new(kind, self.record_id),
            requester_subject: self.requester_subject,
            reason: self.reason,
            status,
            reviewer_subject: self.reviewer_subject,
            reviewer_note: self.reviewer_note,
            reviewed_at: self.reviewed_at,
            created_at: self.created_at,
        })
    }
}

#[async_trait]
impl LeaseRepository for PostgresLeaseRepository {
    async fn create_lease(
        &self,
        organization_id: OrganizationId,
        input: CreateLeaseInput,
    ) -> AppResult<Lease> {
        let result = sqlx::query_as::<_, LeaseRow>(
            r#"
            INSERT INTO edit_leases (
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewed_at
            )
            VALUES (
                $1, $2, $3, $4, $5, $6,
                CASE WHEN $6 = 'approved' THEN $4 END,
                CASE WHEN $6 = 'approved' THEN now() END
            )
            RETURNING
                id,
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewer_note,
                to_char(reviewed_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS reviewed_at,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(input.target.kind.as_str())
        .bind(input.target.record_id)
        .bind(input.requester_subject.as_str())
        .bind(input.reason.as_str())
        .bind(input.initial_status.as_str())
        .fetch_one(&self.pool)
        .await;

        match result {
            Ok(row) => row.into_lease(),
            Err(error) => {
                if let sqlx::Error::Database(database_error) = &error
                    && database_error.code().as_deref() == Some("23505")
                {
                    return Err(AppError::Conflict(format!(
                        "an active edit lease already exists for record '{}'",
                        input.target
                    )));
                }

                Err(AppError::Internal(format!(
                    "failed to create edit lease: {error}"
                )))
            }
        }
    }

    async fn find_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Option<Lease>> {
        let row = sqlx::query_as::<_, LeaseRow>(
            r#"
            SELECT
                id,
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewer_note,
                to_char(reviewed_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS reviewed_at,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            FROM edit_leases
            WHERE organization_id = $1
              AND id = $2
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(lease_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to load edit lease: {error}")))?;

        row.map(LeaseRow::into_lease).transpose()
    }

    async fn find_active_lease(
        &self,
        organization_id: OrganizationId,
        target: &LeaseTarget,
    ) -> AppResult<Option<Lease>> {
        let row = sqlx::query_as::<_, LeaseRow>(
            r#"
            SELECT
                id,
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewer_note,
                to_char(reviewed_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS reviewed_at,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            FROM edit_leases
            WHERE organization_id = $1
              AND record_kind = $2
              AND record_id = $3
              AND status IN ('pending', 'approved')
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(target.kind.as_str())
        .bind(target.record_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| {
            AppError::Internal(format!("failed to load active edit lease: {error}"))
        })?;

        row.map(LeaseRow::into_lease).transpose()
    }

    async fn resolve_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
        status: LeaseStatus,
        reviewer_subject: &str,
        reviewer_note: Option<&str>,
    ) -> AppResult<Lease> {
        let row = sqlx::query_as::<_, LeaseRow>(
            r#"
            UPDATE edit_leases
            SET status = $3,
                reviewer_subject = $4,
                reviewer_note = $5,
                reviewed_at = now()
            WHERE organization_id = $1
              AND id = $2
              AND status = 'pending'
            RETURNING
                id,
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewer_note,
                to_char(reviewed_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS reviewed_at,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(lease_id)
        .bind(status.as_str())
        .bind(reviewer_subject)
        .bind(reviewer_note)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to resolve edit lease: {error}")))?;

        match row {
            Some(row) => row.into_lease(),
            None => Err(AppError::InvalidTransition(format!(
                "edit lease '{lease_id}' is no longer pending"
            ))),
        }
    }

    async fn delete_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease> {
        let row = sqlx::query_as::<_, LeaseRow>(
            r#"
            DELETE FROM edit_leases
            WHERE organization_id = $1
              AND id = $2
              AND status IN ('pending', 'approved')
            RETURNING
                id,
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewer_note,
                to_char(reviewed_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS reviewed_at,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(lease_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to delete edit lease: {error}")))?;

        match row {
            Some(row) => row.into_lease(),
            None => Err(AppError::InvalidTransition(format!(
                "edit lease '{lease_id}' is no longer active"
            ))),
        }
    }

    async fn complete_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease> {
        let row = sqlx::query_as::<_, LeaseRow>(
            r#"
            UPDATE edit_leases
            SET status = 'completed'
            WHERE organization_id = $1
              AND id = $2
              AND status = 'approved'
            RETURNING
                id,
                organization_id,
                record_kind,
                record_id,
                requester_subject,
                reason,
                status,
                reviewer_subject,
                reviewer_note,
                to_char(reviewed_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS reviewed_at,
                to_char(created_at AT TIME ZONE 'UTC', 'YYYY-MM-DD"T"HH24:MI:SS"Z"') AS created_at
            "#,
        )
        .bind(organization_id.as_uuid())
        .bind(lease_id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|error| AppError::Internal(format!("failed to complete edit lease: {error}")))?;

        match row {
            Some(row) => row.into_lease(),
            None => Err(AppError::InvalidTransition(format!(
                "edit lease '{lease_id}' is not approved"
            ))),
        }
    }
}
