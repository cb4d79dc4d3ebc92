use async_trait::async_trait;
use orgdesk_core::{AppResult, OrganizationId};
use orgdesk_domain::{EditAuditAction, LeaseTarget};
use serde_json::Value;
use uuid::Uuid;

/// Immutable audit event payload emitted by the edit-lock workflow.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditAuditEvent {
    /// Organization scope for the event.
    pub organization_id: OrganizationId,
    /// Subject that performed the action.
    pub subject: String,
    /// Stable audit action identifier.
    pub action: EditAuditAction,
    /// Record the lease protects.
    pub target: LeaseTarget,
    /// Lease the action applies to.
    pub lease_id: Uuid,
    /// Structured event metadata.
    pub metadata: Value,
}

/// Port for persisting append-only edit audit events.
#[async_trait]
pub trait EditAuditRepository: Send + Sync {
    /// Persists one audit event.
    async fn append_event(&self, event: EditAuditEvent) -> AppResult<()>;
}
