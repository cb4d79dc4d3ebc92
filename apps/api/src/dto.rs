use orgdesk_application::Lease;
use orgdesk_domain::{Decision, LeaseStatus, RecordKind};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Health probe payload.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Request payload for creating an edit request.
#[derive(Debug, Deserialize)]
pub struct RequestAccessRequest {
    pub record_kind: RecordKind,
    pub record_id: Uuid,
    pub reason: String,
}

/// Request payload for resolving a pending edit request.
#[derive(Debug, Deserialize)]
pub struct ResolveLeaseRequest {
    pub decision: Decision,
    pub note: Option<String>,
}

/// Query parameters identifying a lease target.
#[derive(Debug, Deserialize)]
pub struct LeaseTargetQuery {
    pub record_kind: RecordKind,
    pub record_id: Uuid,
}

/// Lease projection returned to the UI layer.
#[derive(Debug, Serialize)]
pub struct LeaseResponse {
    pub lease_id: Uuid,
    pub record_kind: RecordKind,
    pub record_id: Uuid,
    pub requester_subject: String,
    pub reason: String,
    pub status: LeaseStatus,
    pub reviewer_subject: Option<String>,
    pub reviewer_note: Option<String>,
    pub reviewed_at: Option<String>,
    pub created_at: String,
}

impl From<Lease> for LeaseResponse {
    fn from(value: Lease) -> Self {
        Self {
            lease_id: value.lease_id,
            record_kind: value.target.kind,
            record_id: value.target.record_id,
            requester_subject: value.requester_subject,
            reason: value.reason,
            status: value.status,
            reviewer_subject: value.reviewer_subject,
            reviewer_note: value.reviewer_note,
            reviewed_at: value.reviewed_at,
            created_at: value.created_at,
        }
    }
}

/// Derived edit permission returned to the UI layer.
#[derive(Debug, Serialize)]
pub struct CanEditResponse {
    pub can_edit: bool,
}
