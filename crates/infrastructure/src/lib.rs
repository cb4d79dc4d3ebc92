//! Infrastructure adapters for application ports.

#![forbid(unsafe_code)]

mod console_notification_sink;
mod in_memory_lease_repository;
mod postgres_audit_repository;
mod postgres_authorization_repository;
mod postgres_lease_repository;
mod postgres_notification_repository;
mod postgres_record_metadata_repository;

pub use console_notification_sink::ConsoleNotificationSink;
pub use in_memory_lease_repository::InMemoryLeaseRepository;
pub use postgres_audit_repository::PostgresAuditRepository;
pub use postgres_authorization_repository::PostgresAuthorizationRepository;
pub use postgres_lease_repository::PostgresLeaseRepository;
pub use postgres_notification_repository::PostgresNotificationRepository;
pub use postgres_record_metadata_repository::PostgresRecordMetadataRepository;
