use super::*;

impl EditLockService {
    /// Resolves a pending edit request with a reviewer decision.
    pub async fn resolve(
        &self,
        actor: &UserIdentity,
        lease_id: Uuid,
        decision: Decision,
        note: Option<String>,
    ) -> AppResult<Lease> {
        let organization_id = actor.organization_id();
        let lease = self.load_lease(organization_id, lease_id).await?;

        let actor_role = TransitionActor {
            is_requester: lease.requester_subject == actor.subject(),
            is_privileged: self
                .authorization_service
                .is_privileged(organization_id, actor.subject())
                .await?,
        };
        let outcome = transition(lease.status, LeaseAction::Resolve(decision), actor_role)?;
        let LeaseTransition::Resolved(next_status) = outcome else {
            return Err(AppError::Internal(
                "resolve produced an unexpected transition".to_owned(),
            ));
        };

        let resolved = self
            .lease_repository
            .resolve_lease(
                organization_id,
                lease_id,
                next_status,
                actor.subject(),
                note.as_deref(),
            )
            .await?;

        let summary = self.describe_target(organization_id, &resolved.target).await;
        let (kind, title, verdict) = match decision {
            Decision::Approve => (
                NotificationKind::EditRequestApproved,
                "Edit request approved",
                "approved",
            ),
            Decision::Reject => (
                NotificationKind::EditRequestRejected,
                "Edit request rejected",
                "rejected",
            ),
        };

        self.notify_best_effort(
            organization_id,
            Notification {
                recipient_subject: resolved.requester_subject.clone(),
                kind,
                title: title.to_owned(),
                message: match note {
                    Some(note) => {
                        format!("Your edit request for {summary} was {verdict}: {note}")
                    }
                    None => format!("Your edit request for {summary} was {verdict}"),
                },
                metadata: json!({
                    "lease_id": resolved.lease_id,
                    "record_kind": resolved.target.kind.as_str(),
                    "record_id": resolved.target.record_id,
                }),
            },
        )
        .await;

        let action = match decision {
            Decision::Approve => EditAuditAction::ApproveEdit,
            Decision::Reject => EditAuditAction::RejectEdit,
        };
        self.audit_best_effort(EditAuditEvent {
            organization_id,
            subject: actor.subject().to_owned(),
            action,
            target: resolved.target,
            lease_id,
            metadata: json!({ "note": resolved.reviewer_note }),
        })
        .await;

        Ok(resolved)
    }
}
