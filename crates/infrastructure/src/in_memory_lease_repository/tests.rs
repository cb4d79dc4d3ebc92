use std::sync::Arc;

use orgdesk_application::{CreateLeaseInput, LeaseRepository};
use orgdesk_core::{AppError, OrganizationId};
use orgdesk_domain::{LeaseStatus, LeaseTarget, RecordKind};
use uuid::Uuid;

use super::InMemoryLeaseRepository;

fn pending_input(target: LeaseTarget, requester: &str) -> CreateLeaseInput {
    CreateLeaseInput {
        target,
        requester_subject: requester.to_owned(),
        reason: "fix amount".to_owned(),
        initial_status: LeaseStatus::Pending,
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn concurrent_requests_admit_exactly_one_winner() {
    let repository = Arc::new(InMemoryLeaseRepository::new());
    let organization_id = OrganizationId::new();
    let target = LeaseTarget::new(RecordKind::Income, Uuid::new_v4());

    let handles: Vec<_> = (0..8)
        .map(|index| {
            let repository = repository.clone();
            tokio::spawn(async move {
                repository
                    .create_lease(
                        organization_id,
                        pending_input(target, &format!("requester-{index}")),
                    )
                    .await
            })
        })
        .collect();

    let mut winners = 0;
    let mut conflicts = 0;
    for handle in handles {
        match handle.await {
            Ok(Ok(_)) => winners += 1,
            Ok(Err(AppError::Conflict(_))) => conflicts += 1,
            Ok(Err(error)) => panic!("unexpected error: {error}"),
            Err(error) => panic!("task panicked: {error}"),
        }
    }

    assert_eq!(winners, 1);
    assert_eq!(conflicts, 7);

    let active = repository.find_active_lease(organization_id, &target).await;
    assert!(matches!(active, Ok(Some(_))));
}

#[tokio::test]
async fn leases_on_different_targets_do_not_interact() {
    let repository = InMemoryLeaseRepository::new();
    let organization_id = OrganizationId::new();
    let first = LeaseTarget::new(RecordKind::Income, Uuid::new_v4());
    let second = LeaseTarget::new(RecordKind::Pledge, Uuid::new_v4());

    let first_result = repository
        .create_lease(organization_id, pending_input(first, "ulla"))
        .await;
    let second_result = repository
        .create_lease(organization_id, pending_input(second, "vera"))
        .await;

    assert!(first_result.is_ok());
    assert!(second_result.is_ok());
}

#[tokio::test]
async fn delete_frees_the_target_for_a_new_lease() {
    let repository = InMemoryLeaseRepository::new();
    let organization_id = OrganizationId::new();
    let target = LeaseTarget::new(RecordKind::Expense, Uuid::new_v4());

    let created = repository
        .create_lease(organization_id, pending_input(target, "ulla"))
        .await;
    let lease_id = match created {
        Ok(lease) => lease.lease_id,
        Err(error) => panic!("unexpected error: {error}"),
    };

    let blocked = repository
        .create_lease(organization_id, pending_input(target, "vera"))
        .await;
    assert!(matches!(blocked, Err(AppError::Conflict(_))));

    let deleted = repository.delete_lease(organization_id, lease_id).await;
    assert!(deleted.is_ok());

    let fresh = repository
        .create_lease(organization_id, pending_input(target, "vera"))
        .await;
    assert!(fresh.is_ok());
}

#[tokio::test]
async fn resolve_is_compare_and_set_on_pending_status() {
    let repository = InMemoryLeaseRepository::new();
    let organization_id = OrganizationId::new();
    let target = LeaseTarget::new(RecordKind::Income, Uuid::new_v4());

    let created = repository
        .create_lease(organization_id, pending_input(target, "ulla"))
        .await;
    let lease_id = match created {
        Ok(lease) => lease.lease_id,
        Err(error) => panic!("unexpected error: {error}"),
    };

    let approved = repository
        .resolve_lease(
            organization_id,
            lease_id,
            LeaseStatus::Approved,
            "owner",
            Some("ok"),
        )
        .await;
    assert!(approved.is_ok());

    let again = repository
        .resolve_lease(organization_id, lease_id, LeaseStatus::Rejected, "owner", None)
        .await;
    assert!(matches!(again, Err(AppError::InvalidTransition(_))));
}

#[tokio::test]
async fn auto_approved_lease_records_the_requester_as_reviewer() {
    let repository = InMemoryLeaseRepository::new();
    let organization_id = OrganizationId::new();
    let target = LeaseTarget::new(RecordKind::Income, Uuid::new_v4());

    let created = repository
        .create_lease(
            organization_id,
            CreateLeaseInput {
                target,
                requester_subject: "owner".to_owned(),
                reason: "correct category".to_owned(),
                initial_status: LeaseStatus::Approved,
            },
        )
        .await;

    match created {
        Ok(lease) => {
            assert_eq!(lease.reviewer_subject.as_deref(), Some("owner"));
            assert!(lease.reviewed_at.is_some());
        }
        Err(error) => panic!("unexpected error: {error}"),
    }
}
