//! Application services and ports for the edit-lock workflow.

#![forbid(unsafe_code)]

mod authorization_service;
mod edit_lock_ports;
mod edit_lock_service;

pub use authorization_service::{AuthorizationRepository, AuthorizationService};
pub use edit_lock_ports::{
    CreateLeaseInput, EditAuditEvent, EditAuditRepository, Lease, LeaseRepository, Notification,
    NotificationSink, RecordMetadataRepository,
};
pub use edit_lock_service::EditLockService;
