use std::str::FromStr;

use orgdesk_core::{AppError, AppResult};
use serde::{Deserialize, Serialize};

/// Lifecycle states of an edit lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseStatus {
    /// Awaiting a reviewer decision.
    Pending,
    /// Edit access granted; the requester holds the lock.
    Approved,
    /// Declined by a reviewer. Terminal.
    Rejected,
    /// Released by the holder after editing. Terminal.
    Completed,
}

impl LeaseStatus {
    /// Returns a stable storage value for this status.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Completed => "completed",
        }
    }

    /// Returns whether the lease currently excludes other requesters.
    #[must_use]
    pub fn is_active(&self) -> bool {
        matches!(self, Self::Pending | Self::Approved)
    }

    /// Returns whether the lease reached a terminal state and is immutable.
    #[must_use]
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Rejected | Self::Completed)
    }
}

impl FromStr for LeaseStatus {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "completed" => Ok(Self::Completed),
            _ => Err(AppError::Validation(format!(
                "unknown lease status '{value}'"
            ))),
        }
    }
}

/// Reviewer decision over a pending lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Decision {
    /// Grant edit access to the requester.
    Approve,
    /// Decline the edit request.
    Reject,
}

impl Decision {
    /// Returns the status a pending lease moves to under this decision.
    #[must_use]
    pub fn resolved_status(&self) -> LeaseStatus {
        match self {
            Self::Approve => LeaseStatus::Approved,
            Self::Reject => LeaseStatus::Rejected,
        }
    }
}

/// Actions that mutate an existing lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseAction {
    /// Reviewer resolves a pending lease.
    Resolve(Decision),
    /// Requester self-cancel or privileged revoke; deletes the lease.
    Cancel,
    /// Holder releases an approved lease after editing.
    Complete,
}

/// Relationship of the acting user to the lease under transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionActor {
    /// The actor is the lease requester.
    pub is_requester: bool,
    /// The actor holds elevated privilege over the owning organization.
    pub is_privileged: bool,
}

/// Outcome of a permitted lease transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LeaseTransition {
    /// The lease moves to the given resolved status.
    Resolved(LeaseStatus),
    /// The lease row is deleted, freeing the target.
    Deleted,
    /// The lease moves to the completed status.
    Completed,
}

/// Returns the status a freshly created lease starts in.
///
/// A privileged requester is granted access directly, with no pending
/// interval; everyone else waits for a reviewer.
#[must_use]
pub fn initial_status(requester_is_privileged: bool) -> LeaseStatus {
    if requester_is_privileged {
        LeaseStatus::Approved
    } else {
        LeaseStatus::Pending
    }
}

/// Validates a lease transition.
///
/// Terminal leases reject every action. Authority failures surface as
/// `Forbidden`; lifecycle-shape failures surface as `InvalidTransition`.
/// Creation conflicts are not handled here: the store's uniqueness
/// constraint is the authority for the one-active-lease-per-target rule.
pub fn transition(
    current: LeaseStatus,
    action: LeaseAction,
    actor: TransitionActor,
) -> AppResult<LeaseTransition> {
    if current.is_terminal() {
        return Err(AppError::InvalidTransition(format!(
            "lease is already {} and cannot change",
            current.as_str()
        )));
    }

    match action {
        LeaseAction::Resolve(decision) => {
            if current != LeaseStatus::Pending {
                return Err(AppError::InvalidTransition(format!(
                    "only pending leases can be resolved, current status is {}",
                    current.as_str()
                )));
            }
            if !actor.is_privileged {
                return Err(AppError::Forbidden(
                    "resolving an edit request requires a privileged reviewer".to_owned(),
                ));
            }

            Ok(LeaseTransition::Resolved(decision.resolved_status()))
        }
        LeaseAction::Cancel => {
            if !actor.is_requester && !actor.is_privileged {
                return Err(AppError::Forbidden(
                    "only the requester or a privileged reviewer can cancel an edit lease"
                        .to_owned(),
                ));
            }

            Ok(LeaseTransition::Deleted)
        }
        LeaseAction::Complete => {
            if current != LeaseStatus::Approved {
                return Err(AppError::InvalidTransition(format!(
                    "only approved leases can be completed, current status is {}",
                    current.as_str()
                )));
            }
            if !actor.is_requester {
                return Err(AppError::Forbidden(
                    "only the lease holder can complete an edit lease".to_owned(),
                ));
            }

            Ok(LeaseTransition::Completed)
        }
    }
}

#[cfg(test)]
mod tests {
    use orgdesk_core::AppError;
    use proptest::prelude::*;

    use super::{
        Decision, LeaseAction, LeaseStatus, LeaseTransition, TransitionActor, initial_status,
        transition,
    };

    fn requester() -> TransitionActor {
        TransitionActor {
            is_requester: true,
            is_privileged: false,
        }
    }

    fn reviewer() -> TransitionActor {
        TransitionActor {
            is_requester: false,
            is_privileged: true,
        }
    }

    fn stranger() -> TransitionActor {
        TransitionActor {
            is_requester: false,
            is_privileged: false,
        }
    }

    #[test]
    fn privileged_requester_starts_approved() {
        assert_eq!(initial_status(true), LeaseStatus::Approved);
        assert_eq!(initial_status(false), LeaseStatus::Pending);
    }

    #[test]
    fn reviewer_resolves_pending_lease() {
        let approved = transition(
            LeaseStatus::Pending,
            LeaseAction::Resolve(Decision::Approve),
            reviewer(),
        );
        assert_eq!(
            approved.ok(),
            Some(LeaseTransition::Resolved(LeaseStatus::Approved))
        );

        let rejected = transition(
            LeaseStatus::Pending,
            LeaseAction::Resolve(Decision::Reject),
            reviewer(),
        );
        assert_eq!(
            rejected.ok(),
            Some(LeaseTransition::Resolved(LeaseStatus::Rejected))
        );
    }

    #[test]
    fn unprivileged_actor_cannot_resolve() {
        let result = transition(
            LeaseStatus::Pending,
            LeaseAction::Resolve(Decision::Approve),
            requester(),
        );
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn approved_lease_cannot_be_resolved_again() {
        let result = transition(
            LeaseStatus::Approved,
            LeaseAction::Resolve(Decision::Reject),
            reviewer(),
        );
        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[test]
    fn requester_and_reviewer_can_cancel_active_lease() {
        for status in [LeaseStatus::Pending, LeaseStatus::Approved] {
            for actor in [requester(), reviewer()] {
                let result = transition(status, LeaseAction::Cancel, actor);
                assert_eq!(result.ok(), Some(LeaseTransition::Deleted));
            }
        }
    }

    #[test]
    fn stranger_cannot_cancel() {
        let result = transition(LeaseStatus::Approved, LeaseAction::Cancel, stranger());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[test]
    fn holder_completes_approved_lease() {
        let result = transition(LeaseStatus::Approved, LeaseAction::Complete, requester());
        assert_eq!(result.ok(), Some(LeaseTransition::Completed));
    }

    #[test]
    fn pending_lease_cannot_be_completed() {
        let result = transition(LeaseStatus::Pending, LeaseAction::Complete, requester());
        assert!(matches!(result, Err(AppError::InvalidTransition(_))));
    }

    #[test]
    fn non_holder_cannot_complete() {
        let result = transition(LeaseStatus::Approved, LeaseAction::Complete, reviewer());
        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    fn action_strategy() -> impl Strategy<Value = LeaseAction> {
        prop_oneof![
            Just(LeaseAction::Resolve(Decision::Approve)),
            Just(LeaseAction::Resolve(Decision::Reject)),
            Just(LeaseAction::Cancel),
            Just(LeaseAction::Complete),
        ]
    }

    proptest! {
        #[test]
        fn terminal_statuses_reject_every_action(
            action in action_strategy(),
            is_requester in any::<bool>(),
            is_privileged in any::<bool>(),
        ) {
            for status in [LeaseStatus::Rejected, LeaseStatus::Completed] {
                let actor = TransitionActor { is_requester, is_privileged };
                let result = transition(status, action, actor);
                prop_assert!(matches!(result, Err(AppError::InvalidTransition(_))));
            }
        }
    }
}
