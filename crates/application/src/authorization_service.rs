use std::sync::Arc;

use async_trait::async_trait;
use orgdesk_core::{AppError, AppResult, OrganizationId};

/// Repository port for privilege lookups against current organization membership.
#[async_trait]
pub trait AuthorizationRepository: Send + Sync {
    /// Returns whether the subject holds an elevated role in the organization.
    async fn subject_is_privileged(
        &self,
        organization_id: OrganizationId,
        subject: &str,
    ) -> AppResult<bool>;

    /// Lists the subjects of every member with an elevated role.
    async fn list_privileged_subjects(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<String>>;
}

/// Application service for organization-scoped privilege checks.
#[derive(Clone)]
pub struct AuthorizationService {
    repository: Arc<dyn AuthorizationRepository>,
}

impl AuthorizationService {
    /// Creates a new authorization service from a repository implementation.
    #[must_use]
    pub fn new(repository: Arc<dyn AuthorizationRepository>) -> Self {
        Self { repository }
    }

    /// Returns whether the subject currently holds elevated privilege.
    pub async fn is_privileged(
        &self,
        organization_id: OrganizationId,
        subject: &str,
    ) -> AppResult<bool> {
        self.repository
            .subject_is_privileged(organization_id, subject)
            .await
    }

    /// Ensures the subject holds elevated privilege in the organization.
    pub async fn require_privileged(
        &self,
        organization_id: OrganizationId,
        subject: &str,
    ) -> AppResult<()> {
        if self.is_privileged(organization_id, subject).await? {
            return Ok(());
        }

        Err(AppError::Forbidden(format!(
            "subject '{subject}' lacks elevated privilege in organization '{organization_id}'"
        )))
    }

    /// Returns the current reviewer fan-out list for the organization.
    ///
    /// Queried fresh on every call so the list always reflects current
    /// membership.
    pub async fn reviewer_subjects(
        &self,
        organization_id: OrganizationId,
    ) -> AppResult<Vec<String>> {
        self.repository
            .list_privileged_subjects(organization_id)
            .await
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use orgdesk_core::{AppError, AppResult, OrganizationId};

    use super::{AuthorizationRepository, AuthorizationService};

    struct FakeAuthorizationRepository {
        privileged: Vec<String>,
    }

    #[async_trait]
    impl AuthorizationRepository for FakeAuthorizationRepository {
        async fn subject_is_privileged(
            &self,
            _organization_id: OrganizationId,
            subject: &str,
        ) -> AppResult<bool> {
            Ok(self.privileged.iter().any(|value| value == subject))
        }

        async fn list_privileged_subjects(
            &self,
            _organization_id: OrganizationId,
        ) -> AppResult<Vec<String>> {
            Ok(self.privileged.clone())
        }
    }

    fn service(privileged: &[&str]) -> AuthorizationService {
        AuthorizationService::new(Arc::new(FakeAuthorizationRepository {
            privileged: privileged.iter().map(|value| (*value).to_owned()).collect(),
        }))
    }

    #[tokio::test]
    async fn require_privileged_rejects_plain_members() {
        let organization_id = OrganizationId::new();
        let result = service(&["owner"])
            .require_privileged(organization_id, "member")
            .await;

        assert!(matches!(result, Err(AppError::Forbidden(_))));
    }

    #[tokio::test]
    async fn require_privileged_accepts_elevated_members() {
        let organization_id = OrganizationId::new();
        let result = service(&["owner"])
            .require_privileged(organization_id, "owner")
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn reviewer_subjects_returns_current_membership() {
        let organization_id = OrganizationId::new();
        let reviewers = service(&["owner", "treasurer"])
            .reviewer_subjects(organization_id)
            .await;

        assert_eq!(reviewers.ok(), Some(vec!["owner".to_owned(), "treasurer".to_owned()]));
    }
}
