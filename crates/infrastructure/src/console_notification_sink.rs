//! Console notification sink for development. Logs notifications to tracing output.

use async_trait::async_trait;
use orgdesk_application::{Notification, NotificationSink};
use orgdesk_core::{AppResult, OrganizationId};
use tracing::info;

/// Development notification sink that logs deliveries to the console.
#[derive(Clone)]
pub struct ConsoleNotificationSink;

impl ConsoleNotificationSink {
    /// Creates a new console notification sink.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for ConsoleNotificationSink {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NotificationSink for ConsoleNotificationSink {
    async fn deliver(
        &self,
        organization_id: OrganizationId,
        notification: Notification,
    ) -> AppResult<()> {
        info!(
            organization = %organization_id,
            recipient = notification.recipient_subject,
            kind = notification.kind.as_str(),
            "--- NOTIFICATION (console) ---\n{}\n\n{}\n--- END NOTIFICATION ---",
            notification.title,
            notification.message
        );

        Ok(())
    }
}
