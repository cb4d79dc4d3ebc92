//! Workflow façade for the record edit-lock and approval protocol.

use std::sync::Arc;

use orgdesk_core::{AppError, AppResult, NonEmptyString, OrganizationId, UserIdentity};
use orgdesk_domain::{
    Decision, EditAuditAction, LeaseAction, LeaseStatus, LeaseTarget, LeaseTransition,
    NotificationKind, TransitionActor, initial_status, transition,
};
use serde_json::json;
use tracing::warn;
use uuid::Uuid;

use crate::AuthorizationService;
use crate::edit_lock_ports::{
    CreateLeaseInput, EditAuditEvent, EditAuditRepository, Lease, LeaseRepository, Notification,
    NotificationSink, RecordMetadataRepository,
};

mod cancel;
mod complete;
mod queries;
mod request;
mod resolve;

/// Application service coordinating edit leases, reviews, and side effects.
///
/// The lease store write is the only step that must succeed; notification
/// and audit appends run afterwards, independently, and their failures are
/// logged without failing the primary operation.
#[derive(Clone)]
pub struct EditLockService {
    authorization_service: AuthorizationService,
    lease_repository: Arc<dyn LeaseRepository>,
    notification_sink: Arc<dyn NotificationSink>,
    audit_repository: Arc<dyn EditAuditRepository>,
    record_metadata_repository: Arc<dyn RecordMetadataRepository>,
}

impl EditLockService {
    /// Creates a new service from required dependencies.
    #[must_use]
    pub fn new(
        authorization_service: AuthorizationService,
        lease_repository: Arc<dyn LeaseRepository>,
        notification_sink: Arc<dyn NotificationSink>,
        audit_repository: Arc<dyn EditAuditRepository>,
        record_metadata_repository: Arc<dyn RecordMetadataRepository>,
    ) -> Self {
        Self {
            authorization_service,
            lease_repository,
            notification_sink,
            audit_repository,
            record_metadata_repository,
        }
    }

    async fn load_lease(
        &self,
        organization_id: OrganizationId,
        lease_id: Uuid,
    ) -> AppResult<Lease> {
        self.lease_repository
            .find_lease(organization_id, lease_id)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("edit lease '{lease_id}' was not found")))
    }

    async fn describe_target(
        &self,
        organization_id: OrganizationId,
        target: &LeaseTarget,
    ) -> String {
        match self
            .record_metadata_repository
            .describe_record(organization_id, target)
            .await
        {
            Ok(Some(summary)) => summary,
            Ok(None) => target.to_string(),
            Err(error) => {
                warn!(%error, target = %target, "failed to look up record metadata");
                target.to_string()
            }
        }
    }

    async fn notify_best_effort(
        &self,
        organization_id: OrganizationId,
        notification: Notification,
    ) {
        let recipient = notification.recipient_subject.clone();
        if let Err(error) = self
            .notification_sink
            .deliver(organization_id, notification)
            .await
        {
            warn!(%error, recipient, "failed to deliver edit lock notification");
        }
    }

    async fn audit_best_effort(&self, event: EditAuditEvent) {
        let action = event.action.as_str();
        if let Err(error) = self.audit_repository.append_event(event).await {
            warn!(%error, action, "failed to append edit lock audit event");
        }
    }
}
