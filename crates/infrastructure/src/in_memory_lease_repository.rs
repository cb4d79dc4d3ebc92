use std::collections::HashMap;

use async_trait::async_trait;
use chrono::{SecondsFormat, Utc};
use orgdesk_application::{CreateLeaseInput, Lease, LeaseRepository};
use orgdesk_core::{AppError, AppResult, OrganizationId};
use orgdesk_domain::{LeaseStatus, LeaseTarget};
use tokio::sync::RwLock;
use uuid::Uuid;

#[cfg(test)]
mod tests;

/// In-memory lease repository for tests and demos.
///
/// Every mutation runs inside one write-lock critical section, which gives
/// the same insert-or-conflict atomicity the Postgres adapter gets from its
/// partial unique index.
#[derive(Debug, Default)]
pub struct InMemoryLeaseRepository {
    leases: RwLock<HashMap<Uuid, Lease>>,
}

impl InMemoryLeaseRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self {
            leases: RwLock::new(HashMap::new()),
        }
    }
}

fn now_rfc3339() -> String {
    Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true)
}

#[async_trait]
impl LeaseRepository for InMemoryLeaseRepository {
    async fn create_lease(
        &self,
        organization_id: OrganizationId,
        input: CreateLeaseInput,
    ) -> AppResult<Lease> {
        let mut leases = self.leases.write().await;

        if leases.values().any(|lease| {
            lease.organization_id == organization_id
                && lease.target == input.target
                && lease.status.is_active()
        }) {
            return Err(AppError::Conflict(format!(
                "an active edit lease already exists for record '{}'",
                input.target
            )));
        }

        let (reviewer_subject, reviewed_at) = if input.initial_status == LeaseStatus::Approved {
            (Some(input.requester_subject.clone()), Some(now_rfc3339()))
        } else {
            (None, None)
        };

        let lease = Lease {
            lease_id: Uuid::new_v4(),
            organization_id,
            target: input.target,
            requester_subject: input.requester_subject,
            reason: input.reason,
            status: input.initial_status,
            reviewer_subject,
            reviewer_note: None,
            reviewed_at,
            created_at: now_rfc3339(),
        };
        leases.insert(lease.lease_id, lease.clone());
        Ok(lease)
    }

    async fn find_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Option<Lease>> {
        let leases = self.leases.read().await;
        Ok(leases
            .get(&lease_id)
            .filter(|lease| lease.organization_id == organization_id)
            .cloned())
    }

    async fn find_active_lease(
        &self,
        organization_id: OrganizationId,
        target: &LeaseTarget,
    ) -> AppResult<Option<Lease>> {
        let leases = self.leases.read().await;
        Ok(leases
            .values()
            .find(|lease| {
                lease.organization_id == organization_id
                    && lease.target == *target
                    && lease.status.is_active()
            })
            .cloned())
    }

    async fn resolve_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
        status: LeaseStatus,
        reviewer_subject: &str,
        reviewer_note: Option<&str>,
    ) -> AppResult<Lease> {
        let mut leases = self.leases.write().await;
        let lease = leases
            .get_mut(&lease_id)
            .filter(|lease| lease.organization_id == organization_id)
            .ok_or_else(|| AppError::NotFound(format!("edit lease '{lease_id}' was not found")))?;

        if lease.status != LeaseStatus::Pending {
            return Err(AppError::InvalidTransition(format!(
                "edit lease '{lease_id}' is no longer pending"
            )));
        }

        lease.status = status;
        lease.reviewer_subject = Some(reviewer_subject.to_owned());
        lease.reviewer_note = reviewer_note.map(str::to_owned);
        lease.reviewed_at = Some(now_rfc3339());
        Ok(lease.clone())
    }

    async fn delete_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease> {
        let mut leases = self.leases.write().await;

        let Some(lease) = leases
            .get(&lease_id)
            .filter(|lease| lease.organization_id == organization_id)
        else {
            return Err(AppError::NotFound(format!(
                "edit lease '{lease_id}' was not found"
            )));
        };

        if !lease.status.is_active() {
            return Err(AppError::InvalidTransition(format!(
                "edit lease '{lease_id}' is no longer active"
            )));
        }

        leases
            .remove(&lease_id)
            .ok_or_else(|| AppError::Internal("lease disappeared during delete".to_owned()))
    }

    async fn complete_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease> {
        let mut leases = self.leases.write().await;
        let lease = leases
            .get_mut(&lease_id)
            .filter(|lease| lease.organization_id == organization_id)
            .ok_or_else(|| AppError::NotFound(format!("edit lease '{lease_id}' was not found")))?;

        if lease.status != LeaseStatus::Approved {
            return Err(AppError::InvalidTransition(format!(
                "edit lease '{lease_id}' is not approved"
            )));
        }

        lease.status = LeaseStatus::Completed;
        Ok(lease.clone())
    }
}
