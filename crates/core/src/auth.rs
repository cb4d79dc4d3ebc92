use serde::{Deserialize, Serialize};

use crate::OrganizationId;

/// User information carried through every authenticated request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserIdentity {
    subject: String,
    display_name: String,
    organization_id: OrganizationId,
}

impl UserIdentity {
    /// Creates a user identity from authentication and membership data.
    #[must_use]
    pub fn new(
        subject: impl Into<String>,
        display_name: impl Into<String>,
        organization_id: OrganizationId,
    ) -> Self {
        Self {
            subject: subject.into(),
            display_name: display_name.into(),
            organization_id,
        }
    }

    /// Returns the stable subject claim from the identity provider.
    #[must_use]
    pub fn subject(&self) -> &str {
        self.subject.as_str()
    }

    /// Returns the display name for the current user.
    #[must_use]
    pub fn display_name(&self) -> &str {
        self.display_name.as_str()
    }

    /// Returns the organization linked to the identity.
    #[must_use]
    pub fn organization_id(&self) -> OrganizationId {
        self.organization_id
    }
}
