use super::*;

impl EditLockService {
    /// Cancels an active lease, freeing the target immediately.
    ///
    /// The requester can cancel their own lease at any time; any other
    /// actor must hold elevated privilege, which makes the call a revoke
    /// and notifies the original requester.
    pub async fn cancel(&self, actor: &UserIdentity, lease_id: Uuid) -> AppResult<Lease> {
        let organization_id = actor.organization_id();
        let lease = self.load_lease(organization_id, lease_id).await?;

        let actor_role = TransitionActor {
            is_requester: lease.requester_subject == actor.subject(),
            is_privileged: self
                .authorization_service
                .is_privileged(organization_id, actor.subject())
                .await?,
        };
        transition(lease.status, LeaseAction::Cancel, actor_role)?;

        let deleted = self
            .lease_repository
            .delete_lease(organization_id, lease_id)
            .await?;
        let revoked = deleted.requester_subject != actor.subject();

        if revoked {
            let summary = self.describe_target(organization_id, &deleted.target).await;
            self.notify_best_effort(
                organization_id,
                Notification {
                    recipient_subject: deleted.requester_subject.clone(),
                    kind: NotificationKind::EditAccessRevoked,
                    title: "Edit access revoked".to_owned(),
                    message: format!(
                        "{} revoked your edit access to {summary}",
                        actor.display_name()
                    ),
                    metadata: json!({
                        "lease_id": deleted.lease_id,
                        "record_kind": deleted.target.kind.as_str(),
                        "record_id": deleted.target.record_id,
                    }),
                },
            )
            .await;
        }

        self.audit_best_effort(EditAuditEvent {
            organization_id,
            subject: actor.subject().to_owned(),
            action: EditAuditAction::CancelEdit,
            target: deleted.target,
            lease_id,
            metadata: json!({
                "revoked": revoked,
                "requester": deleted.requester_subject,
            }),
        })
        .await;

        Ok(deleted)
    }
}
