use async_trait::async_trait;
use orgdesk_core::{AppResult, OrganizationId};
use orgdesk_domain::NotificationKind;
use serde_json::Value;

/// Notification payload addressed to a single recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    /// Subject receiving the notification.
    pub recipient_subject: String,
    /// Stable notification kind identifier.
    pub kind: NotificationKind,
    /// Short headline shown in the recipient inbox.
    pub title: String,
    /// Human-readable notification body.
    pub message: String,
    /// Structured metadata for deep links.
    pub metadata: Value,
}

/// Port for handing notifications to the delivery layer.
///
/// Delivery is best-effort: the workflow logs and swallows failures, so
/// implementations must not be relied on for exactly-once semantics.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Delivers one notification.
    async fn deliver(
        &self,
        organization_id: OrganizationId,
        notification: Notification,
    ) -> AppResult<()>;
}
