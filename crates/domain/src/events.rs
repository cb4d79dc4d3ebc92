use serde::{Deserialize, Serialize};

/// Stable audit actions emitted by the edit-lock workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EditAuditAction {
    /// Emitted when an edit lease is created.
    RequestEdit,
    /// Emitted when a lease is approved, by a reviewer or by auto-grant.
    ApproveEdit,
    /// Emitted when a reviewer rejects a pending lease.
    RejectEdit,
    /// Emitted when a lease is cancelled or revoked.
    CancelEdit,
    /// Emitted when the holder releases an approved lease.
    CompleteEdit,
}

impl EditAuditAction {
    /// Returns a stable storage value for this action.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::RequestEdit => "request_edit",
            Self::ApproveEdit => "approve_edit",
            Self::RejectEdit => "reject_edit",
            Self::CancelEdit => "cancel_edit",
            Self::CompleteEdit => "complete_edit",
        }
    }
}

/// Notification categories produced by the edit-lock workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationKind {
    /// Sent to every reviewer when a new pending request is created.
    EditRequestSubmitted,
    /// Sent to the requester when a reviewer approves the request.
    EditRequestApproved,
    /// Sent to the requester when a reviewer rejects the request.
    EditRequestRejected,
    /// Sent to the requester when a privileged actor revokes their lease.
    EditAccessRevoked,
}

impl NotificationKind {
    /// Returns a stable storage value for this notification kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::EditRequestSubmitted => "edit_request_submitted",
            Self::EditRequestApproved => "edit_request_approved",
            Self::EditRequestRejected => "edit_request_rejected",
            Self::EditAccessRevoked => "edit_access_revoked",
        }
    }
}
