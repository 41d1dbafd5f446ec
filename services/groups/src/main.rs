use sea_orm::Database;
use tracing::info;

use awase_groups::config::GroupsConfig;
use awase_groups::router::build_router;
use awase_groups::state::AppState;

#[tokio::main]
async fn main() {
    awase_core::tracing::init_tracing();

    let config = GroupsConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.groups_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("groups service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
