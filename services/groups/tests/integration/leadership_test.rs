use uuid::Uuid;

use awase_groups::domain::types::ReassignMode;
use awase_groups::error::GroupsServiceError;
use awase_groups::usecase::leadership::{TransferLeadershipUseCase, reassign_led_groups};

use crate::helpers::{Backend, moments, test_group, test_user};

// ── Transfer keeps the leader-is-member invariant ────────────────────────────

#[tokio::test]
async fn transferred_leader_should_be_a_current_member() {
    let backend = Backend::new();
    let leader = test_user();
    let member = test_user();
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());
    backend.add_member(group.id, member.id);

    let usecase = TransferLeadershipUseCase {
        groups: backend.group_repo(),
        memberships: backend.membership_repo(),
    };
    usecase
        .execute(leader.id, false, group.id, member.id)
        .await
        .unwrap();

    let new_leader = backend.leader_of(group.id).unwrap();
    assert_eq!(new_leader, member.id);
    assert!(backend.members_of(group.id).contains(&new_leader));
}

// ── Self-transfer rejection ──────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_self_transfer_without_mutating_state() {
    let backend = Backend::new();
    let leader = test_user();
    let admin = test_user();
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());

    let usecase = TransferLeadershipUseCase {
        groups: backend.group_repo(),
        memberships: backend.membership_repo(),
    };

    let self_service = usecase.execute(leader.id, false, group.id, leader.id).await;
    assert!(matches!(
        self_service,
        Err(GroupsServiceError::SelfTransfer)
    ));

    let admin_path = usecase.execute(admin.id, true, group.id, admin.id).await;
    assert!(matches!(admin_path, Err(GroupsServiceError::SelfTransfer)));

    assert_eq!(backend.leader_of(group.id), Some(leader.id));
}

// ── Non-member promotion rejection ───────────────────────────────────────────

#[tokio::test]
async fn should_reject_promoting_a_non_member_on_both_paths() {
    let backend = Backend::new();
    let leader = test_user();
    let outsider = test_user();
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());

    let usecase = TransferLeadershipUseCase {
        groups: backend.group_repo(),
        memberships: backend.membership_repo(),
    };

    let self_service = usecase
        .execute(leader.id, false, group.id, outsider.id)
        .await;
    assert!(matches!(
        self_service,
        Err(GroupsServiceError::NewLeaderNotMember)
    ));

    let admin_path = usecase
        .execute(test_user().id, true, group.id, outsider.id)
        .await;
    assert!(matches!(
        admin_path,
        Err(GroupsServiceError::NewLeaderNotMember)
    ));

    assert_eq!(backend.leader_of(group.id), Some(leader.id));
}

// ── Reassignment tie-break ───────────────────────────────────────────────────

#[tokio::test]
async fn cascade_should_promote_the_earliest_joined_member() {
    let backend = Backend::new();
    let leader = test_user();
    let m1 = test_user();
    let m2 = test_user();
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());

    let [t1, t2] = moments();
    backend.add_member_at(group.id, m1.id, t1);
    backend.add_member_at(group.id, m2.id, t2);

    reassign_led_groups(
        &backend.group_repo(),
        &backend.membership_repo(),
        leader.id,
        ReassignMode::Strict,
    )
    .await
    .unwrap();

    assert_eq!(backend.leader_of(group.id), Some(m1.id));
}

#[tokio::test]
async fn cascade_should_walk_every_led_group() {
    let backend = Backend::new();
    let leader = test_user();
    let successor = test_user();
    let event_id = Uuid::now_v7();

    // One group with a successor, one where the leader is alone.
    let shared = test_group(event_id, leader.id);
    let solo = test_group(event_id, leader.id);
    backend.add_group(shared.clone());
    backend.add_group(solo.clone());
    backend.add_member(shared.id, successor.id);

    reassign_led_groups(
        &backend.group_repo(),
        &backend.membership_repo(),
        leader.id,
        ReassignMode::Strict,
    )
    .await
    .unwrap();

    assert_eq!(backend.leader_of(shared.id), Some(successor.id));
    assert!(!backend.group_exists(solo.id), "sole-member group is deleted");
    assert!(backend.members_of(solo.id).is_empty());
}
