use axum::{
    Router,
    routing::{delete, get, patch, post},
};
use tower_http::trace::TraceLayer;

use awase_core::health::{healthz, readyz};
use awase_core::middleware::request_id_layer;

use crate::handlers::{
    admin::{
        admin_change_leader, admin_remove_member, hard_delete_user, list_users, restore_user,
        soft_delete_user,
    },
    group::{create_group, get_group},
    membership::{join_group, leave_group, remove_member, transfer_leadership},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Groups
        .route("/groups", post(create_group))
        .route("/groups/{id}", get(get_group))
        // Membership
        .route("/groups/{id}/join", post(join_group))
        .route("/groups/{id}/leave", delete(leave_group))
        .route("/groups/{id}/members/{user_id}", delete(remove_member))
        .route("/groups/{id}/transfer", patch(transfer_leadership))
        // Admin — groups
        .route(
            "/admin/groups/{id}/members/{user_id}",
            delete(admin_remove_member),
        )
        .route("/admin/groups/{id}/leader", patch(admin_change_leader))
        // Admin — users
        .route("/admin/users", get(list_users))
        .route("/admin/users/{id}/delete", delete(soft_delete_user))
        .route(
            "/admin/users/{id}/permanent-delete",
            delete(hard_delete_user),
        )
        .route("/admin/users/{id}/restore", post(restore_user))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
