use super::*;

impl EditLockService {
    /// Releases an approved lease once the holder finishes editing.
    pub async fn complete(&self, actor: &UserIdentity, lease_id: Uuid) -> AppResult<Lease> {
        let organization_id = actor.organization_id();
        let lease = self.load_lease(organization_id, lease_id).await?;

        // Completion is holder-only; privilege grants no shortcut here.
        let actor_role = TransitionActor {
            is_requester: lease.requester_subject == actor.subject(),
            is_privileged: false,
        };
        transition(lease.status, LeaseAction::Complete, actor_role)?;

        let completed = self
            .lease_repository
            .complete_lease(organization_id, lease_id)
            .await?;

        self.audit_best_effort(EditAuditEvent {
            organization_id,
            subject: actor.subject().to_owned(),
            action: EditAuditAction::CompleteEdit,
            target: completed.target,
            lease_id,
            metadata: json!({}),
        })
        .await;

        Ok(completed)
    }
}
