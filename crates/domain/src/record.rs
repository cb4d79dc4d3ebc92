use std::fmt::{Display, Formatter};
use std::str::FromStr;

use orgdesk_core::AppError;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Record categories whose edits are guarded by the edit-lock workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecordKind {
    /// Income transaction in the organization ledger.
    Income,
    /// Expense transaction in the organization ledger.
    Expense,
    /// Member pledge commitment.
    Pledge,
}

impl RecordKind {
    /// Returns a stable storage value for this record kind.
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Pledge => "pledge",
        }
    }

    /// Returns all guarded record kinds.
    #[must_use]
    pub fn all() -> &'static [Self] {
        const ALL: &[RecordKind] = &[RecordKind::Income, RecordKind::Expense, RecordKind::Pledge];

        ALL
    }
}

impl FromStr for RecordKind {
    type Err = AppError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "pledge" => Ok(Self::Pledge),
            _ => Err(AppError::Validation(format!(
                "unknown record kind '{value}'"
            ))),
        }
    }
}

impl Display for RecordKind {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        formatter.write_str(self.as_str())
    }
}

/// Composite key identifying the record protected by a lease.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LeaseTarget {
    /// Kind of the protected record.
    pub kind: RecordKind,
    /// Identifier of the protected record.
    pub record_id: Uuid,
}

impl LeaseTarget {
    /// Creates a target from a record kind and identifier.
    #[must_use]
    pub fn new(kind: RecordKind, record_id: Uuid) -> Self {
        Self { kind, record_id }
    }
}

impl Display for LeaseTarget {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> std::fmt::Result {
        write!(formatter, "{}/{}", self.kind, self.record_id)
    }
}

#[cfg(test)]
mod tests {
    use std::str::FromStr;

    use super::RecordKind;

    #[test]
    fn record_kind_round_trips_through_storage_value() {
        for kind in RecordKind::all() {
            assert_eq!(RecordKind::from_str(kind.as_str()).ok(), Some(*kind));
        }
    }

    #[test]
    fn record_kind_rejects_unknown_value() {
        assert!(RecordKind::from_str("membership").is_err());
    }
}
