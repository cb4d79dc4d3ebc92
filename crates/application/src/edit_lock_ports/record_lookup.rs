use async_trait::async_trait;
use orgdesk_core::{AppResult, OrganizationId};
use orgdesk_domain::LeaseTarget;

/// Read-only port describing guarded records for message composition.
#[async_trait]
pub trait RecordMetadataRepository: Send + Sync {
    /// Returns a human-readable summary of the record, when it exists.
    async fn describe_record(
        &self,
        organization_id: OrganizationId,
        target: &LeaseTarget,
    ) -> AppResult<Option<String>>;
}
