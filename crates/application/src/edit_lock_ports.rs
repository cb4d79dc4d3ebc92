//! Ports consumed by the edit-lock workflow service.

mod audit;
mod lease;
mod notification;
mod record_lookup;

pub use audit::{EditAuditEvent, EditAuditRepository};
pub use lease::{CreateLeaseInput, Lease, LeaseRepository};
pub use notification::{Notification, NotificationSink};
pub use record_lookup::RecordMetadataRepository;
