/// Groups service configuration loaded from environment variables.
#[derive(Debug)]
pub struct GroupsConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3117). Env var: `GROUPS_PORT`.
    pub groups_port: u16,
}

impl GroupsConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            groups_port: std::env::var("GROUPS_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3117),
        }
    }
}
