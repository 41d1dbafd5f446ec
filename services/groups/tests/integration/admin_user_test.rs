use chrono::Utc;
use uuid::Uuid;

use awase_groups::error::GroupsServiceError;
use awase_groups::usecase::admin_user::{
    HardDeleteUserUseCase, ListUsersUseCase, RestoreUserUseCase, SoftDeleteUserUseCase,
};
use awase_domain::pagination::PageRequest;
use awase_groups::domain::types::{UserFilter, UserSortBy};

use crate::helpers::{Backend, test_group, test_user};

fn soft_delete(backend: &Backend) -> SoftDeleteUserUseCase<
    crate::helpers::BackendUserRepo,
    crate::helpers::BackendGroupRepo,
    crate::helpers::BackendMembershipRepo,
> {
    SoftDeleteUserUseCase {
        users: backend.user_repo(),
        groups: backend.group_repo(),
        memberships: backend.membership_repo(),
    }
}

fn hard_delete(backend: &Backend) -> HardDeleteUserUseCase<
    crate::helpers::BackendUserRepo,
    crate::helpers::BackendGroupRepo,
    crate::helpers::BackendMembershipRepo,
> {
    HardDeleteUserUseCase {
        users: backend.user_repo(),
        groups: backend.group_repo(),
        memberships: backend.membership_repo(),
    }
}

// ── Last-member cascade deletion ─────────────────────────────────────────────

#[tokio::test]
async fn soft_deleting_a_sole_leader_should_delete_the_group() {
    let backend = Backend::new();
    let leader = test_user();
    backend.add_user(leader.clone());
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());

    soft_delete(&backend).execute(leader.id).await.unwrap();

    assert!(!backend.group_exists(group.id));
    assert!(backend.members_of(group.id).is_empty(), "no dangling rows");
    assert!(backend.users.lock().unwrap()[0].deleted_at.is_some());
}

#[tokio::test]
async fn hard_deleting_a_sole_leader_should_delete_the_group() {
    let backend = Backend::new();
    let mut leader = test_user();
    leader.deleted_at = Some(Utc::now());
    backend.add_user(leader.clone());
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());

    hard_delete(&backend).execute(leader.id).await.unwrap();

    assert!(!backend.group_exists(group.id));
    assert!(backend.members_of(group.id).is_empty());
    assert!(backend.users.lock().unwrap().is_empty());
}

// ── Strict vs lenient deletion semantics ─────────────────────────────────────

#[tokio::test]
async fn failed_promotion_should_abort_logical_deletion_with_diagnostics() {
    let backend = Backend::new();
    let leader = test_user();
    let member = test_user();
    backend.add_user(leader.clone());
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());
    backend.add_member(group.id, member.id);
    backend.break_leader_updates(group.id);

    let result = soft_delete(&backend).execute(leader.id).await;

    match result {
        Err(GroupsServiceError::LeadershipTransferFailed {
            group_id,
            group_name,
            message,
        }) => {
            assert_eq!(group_id, group.id);
            assert_eq!(group_name, group.name);
            assert!(!message.is_empty());
        }
        other => panic!("expected LeadershipTransferFailed, got {other:?}"),
    }
    // The user stays live and can be retried.
    assert!(backend.users.lock().unwrap()[0].deleted_at.is_none());
}

#[tokio::test]
async fn failed_promotion_should_not_abort_physical_deletion() {
    let backend = Backend::new();
    let mut leader = test_user();
    leader.deleted_at = Some(Utc::now());
    backend.add_user(leader.clone());
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());
    backend.add_member(group.id, test_user().id);
    backend.break_leader_updates(group.id);

    hard_delete(&backend).execute(leader.id).await.unwrap();

    assert!(backend.users.lock().unwrap().is_empty());
}

// ── Preconditions ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_reject_logical_deletion_of_an_already_deleted_user() {
    let backend = Backend::new();
    let mut user = test_user();
    user.deleted_at = Some(Utc::now());
    backend.add_user(user.clone());

    let result = soft_delete(&backend).execute(user.id).await;
    assert!(matches!(
        result,
        Err(GroupsServiceError::UserAlreadyDeleted)
    ));
}

#[tokio::test]
async fn should_reject_physical_deletion_of_a_live_user() {
    let backend = Backend::new();
    let user = test_user();
    backend.add_user(user.clone());

    let result = hard_delete(&backend).execute(user.id).await;
    assert!(matches!(result, Err(GroupsServiceError::UserNotDeleted)));
    assert_eq!(backend.users.lock().unwrap().len(), 1);
}

// ── Restore ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn restore_should_clear_the_marker_and_nothing_else() {
    let backend = Backend::new();
    let leader = test_user();
    let member = test_user();
    backend.add_user(leader.clone());
    let group = test_group(Uuid::now_v7(), leader.id);
    backend.add_group(group.clone());
    backend.add_member(group.id, member.id);

    // Soft delete promotes the member, then restore brings the user back.
    soft_delete(&backend).execute(leader.id).await.unwrap();
    assert_eq!(backend.leader_of(group.id), Some(member.id));

    let restored = RestoreUserUseCase {
        users: backend.user_repo(),
    }
    .execute(leader.id)
    .await
    .unwrap();

    assert!(restored.deleted_at.is_none());
    // Leadership lost during the cascade is not reinstated.
    assert_eq!(backend.leader_of(group.id), Some(member.id));
}

// ── Admin user list ──────────────────────────────────────────────────────────

#[tokio::test]
async fn list_should_filter_by_deleted_and_sort_by_email() {
    let backend = Backend::new();
    let mut a = test_user();
    a.email = "a@example.com".into();
    let mut b = test_user();
    b.email = "b@example.com".into();
    b.deleted_at = Some(Utc::now());
    let mut c = test_user();
    c.email = "c@example.com".into();
    backend.add_user(a);
    backend.add_user(b);
    backend.add_user(c);

    let usecase = ListUsersUseCase {
        users: backend.user_repo(),
    };
    let live = usecase
        .execute(
            UserFilter {
                role: None,
                deleted: Some(false),
            },
            UserSortBy::from_kebab_case("email-asc").unwrap(),
            PageRequest::default(),
        )
        .await
        .unwrap();

    let emails: Vec<&str> = live.iter().map(|u| u.email.as_str()).collect();
    assert_eq!(emails, vec!["a@example.com", "c@example.com"]);
}
