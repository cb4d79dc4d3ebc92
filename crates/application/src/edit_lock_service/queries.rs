use super::*;

impl EditLockService {
    /// Returns the current pending or approved lease for a target, if any.
    ///
    /// Used by the UI layer to render lock-status banners and to decide
    /// whether an edit-request form should be shown.
    pub async fn active_lease(
        &self,
        actor: &UserIdentity,
        target: LeaseTarget,
    ) -> AppResult<Option<Lease>> {
        self.lease_repository
            .find_active_lease(actor.organization_id(), &target)
            .await
    }

    /// Returns whether the actor currently holds an approved lease on the target.
    pub async fn can_edit(&self, actor: &UserIdentity, target: LeaseTarget) -> AppResult<bool> {
        let lease = self
            .lease_repository
            .find_active_lease(actor.organization_id(), &target)
            .await?;

        Ok(lease.is_some_and(|lease| {
            lease.status == LeaseStatus::Approved && lease.requester_subject == actor.subject()
        }))
    }
}
