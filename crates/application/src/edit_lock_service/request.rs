use super::*;

impl EditLockService {
    /// Requests exclusive edit access to a record.
    ///
    /// A privileged requester is granted access directly; everyone else
    /// creates a pending request that fans out to the current reviewers.
    /// When an active lease already exists for the target the call returns
    /// a conflict naming the current holder, and callers must not retry
    /// automatically.
    pub async fn request_access(
        &self,
        actor: &UserIdentity,
        target: LeaseTarget,
        reason: String,
    ) -> AppResult<Lease> {
        let reason = NonEmptyString::new(reason).map_err(|_| {
            AppError::Validation("an edit request requires a non-empty reason".to_owned())
        })?;

        let organization_id = actor.organization_id();
        let requester_is_privileged = self
            .authorization_service
            .is_privileged(organization_id, actor.subject())
            .await?;

        let created = self
            .lease_repository
            .create_lease(
                organization_id,
                CreateLeaseInput {
                    target,
                    requester_subject: actor.subject().to_owned(),
                    reason: reason.into(),
                    initial_status: initial_status(requester_is_privileged),
                },
            )
            .await;

        let lease = match created {
            Ok(lease) => lease,
            Err(AppError::Conflict(_)) => {
                // The holder lookup only enriches the message; the answer
                // stays a conflict even when that read fails.
                let holder = match self
                    .lease_repository
                    .find_active_lease(organization_id, &target)
                    .await
                {
                    Ok(active) => active.map(|active| active.requester_subject),
                    Err(error) => {
                        warn!(%error, target = %target, "failed to look up the current lease holder");
                        None
                    }
                };

                return Err(AppError::Conflict(match holder {
                    Some(subject) => format!("record '{target}' is locked by '{subject}'"),
                    None => format!("record '{target}' is locked"),
                }));
            }
            Err(error) => return Err(error),
        };

        if lease.status == LeaseStatus::Pending {
            self.fan_out_to_reviewers(organization_id, actor, &lease)
                .await;
        }

        self.audit_best_effort(EditAuditEvent {
            organization_id,
            subject: actor.subject().to_owned(),
            action: EditAuditAction::RequestEdit,
            target,
            lease_id: lease.lease_id,
            metadata: json!({ "reason": lease.reason }),
        })
        .await;

        if lease.status == LeaseStatus::Approved {
            self.audit_best_effort(EditAuditEvent {
                organization_id,
                subject: actor.subject().to_owned(),
                action: EditAuditAction::ApproveEdit,
                target,
                lease_id: lease.lease_id,
                metadata: json!({ "auto_approved": true }),
            })
            .await;
        }

        Ok(lease)
    }

    async fn fan_out_to_reviewers(
        &self,
        organization_id: OrganizationId,
        actor: &UserIdentity,
        lease: &Lease,
    ) {
        let reviewers = match self
            .authorization_service
            .reviewer_subjects(organization_id)
            .await
        {
            Ok(reviewers) => reviewers,
            Err(error) => {
                warn!(%error, "failed to list reviewers for edit request fan-out");
                return;
            }
        };

        let summary = self.describe_target(organization_id, &lease.target).await;

        for reviewer in reviewers {
            self.notify_best_effort(
                organization_id,
                Notification {
                    recipient_subject: reviewer,
                    kind: NotificationKind::EditRequestSubmitted,
                    title: "New edit request".to_owned(),
                    message: format!(
                        "{} requested edit access to {summary}: {}",
                        actor.display_name(),
                        lease.reason
                    ),
                    metadata: json!({
                        "lease_id": lease.lease_id,
                        "record_kind": lease.target.kind.as_str(),
                        "record_id": lease.target.record_id,
                    }),
                },
            )
            .await;
        }
    }
}
