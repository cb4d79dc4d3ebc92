//! Domain entities and invariants.

#![forbid(unsafe_code)]

mod edit_lock;
mod events;
mod record;

pub use edit_lock::{
    Decision, LeaseAction, LeaseStatus, LeaseTransition, TransitionActor, initial_status,
    transition,
};
pub use events::{EditAuditAction, NotificationKind};
pub use record::{LeaseTarget, RecordKind};
