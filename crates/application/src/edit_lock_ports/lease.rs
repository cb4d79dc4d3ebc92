use async_trait::async_trait;
use orgdesk_core::{AppResult, OrganizationId};
use orgdesk_domain::{LeaseStatus, LeaseTarget};
use uuid::Uuid;

/// Input payload for creating an edit lease.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateLeaseInput {
    /// Record the lease protects.
    pub target: LeaseTarget,
    /// Subject requesting edit access.
    pub requester_subject: String,
    /// Justification for the edit request.
    pub reason: String,
    /// Status the lease starts in: `pending`, or `approved` for self-grants.
    pub initial_status: LeaseStatus,
}

/// Edit lease projection returned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lease {
    /// Stable lease id.
    pub lease_id: Uuid,
    /// Organization owning the protected record.
    pub organization_id: OrganizationId,
    /// Record the lease protects.
    pub target: LeaseTarget,
    /// Subject that requested edit access.
    pub requester_subject: String,
    /// Justification captured at request time.
    pub reason: String,
    /// Current lifecycle status.
    pub status: LeaseStatus,
    /// Reviewer that resolved the lease; the requester for self-grants.
    pub reviewer_subject: Option<String>,
    /// Optional note left by the reviewer.
    pub reviewer_note: Option<String>,
    /// Review timestamp in RFC3339, when resolved.
    pub reviewed_at: Option<String>,
    /// Creation timestamp in RFC3339.
    pub created_at: String,
}

/// Store port for edit leases.
///
/// Implementations must enforce the one-active-lease-per-target invariant
/// atomically inside `create_lease` and report violations as
/// [`orgdesk_core::AppError::Conflict`]. The mutation methods are
/// compare-and-set: they re-check the required source status and report a
/// lost race as [`orgdesk_core::AppError::InvalidTransition`].
#[async_trait]
pub trait LeaseRepository: Send + Sync {
    /// Atomically inserts a lease unless an active one exists for the target.
    async fn create_lease(
        &self,
        organization_id: OrganizationId,
        input: CreateLeaseInput,
    ) -> AppResult<Lease>;

    /// Finds a lease by id.
    async fn find_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Option<Lease>>;

    /// Finds the current pending or approved lease for a target.
    async fn find_active_lease(
        &self,
        organization_id: OrganizationId,
        target: &LeaseTarget,
    ) -> AppResult<Option<Lease>>;

    /// Moves a pending lease to a resolved status and records the reviewer.
    async fn resolve_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
        status: LeaseStatus,
        reviewer_subject: &str,
        reviewer_note: Option<&str>,
    ) -> AppResult<Lease>;

    /// Deletes an active lease and returns the removed row.
    async fn delete_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease>;

    /// Moves an approved lease to the completed status.
    async fn complete_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease>;
}
