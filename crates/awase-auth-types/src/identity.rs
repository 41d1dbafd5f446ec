//! Gateway-injected identity headers extractor.

use axum::Json;
use axum::extract::FromRequestParts;
use axum::response::{IntoResponse, Response};
use http::StatusCode;
use http::request::Parts;
use uuid::Uuid;

/// Rejection for a missing or malformed session identity.
///
/// Renders the API-wide error body shape: `401 {"error": "unauthorized"}`.
#[derive(Debug)]
pub struct Unauthorized;

impl IntoResponse for Unauthorized {
    fn into_response(self) -> Response {
        let body = serde_json::json!({ "error": "unauthorized" });
        (StatusCode::UNAUTHORIZED, Json(body)).into_response()
    }
}

/// Caller identity injected by the session gateway via `x-awase-user-id`
/// and `x-awase-user-role` headers.
///
/// Rejects with 401 if either header is absent or cannot be parsed.
/// Role enforcement (403) is done by handlers after extraction.
#[derive(Debug, Clone)]
pub struct Identity {
    pub user_id: Uuid,
    pub user_role: u8,
}

impl<S> FromRequestParts<S> for Identity
where
    S: Send + Sync,
{
    type Rejection = Unauthorized;

    // axum-core 0.5 defines this as `fn -> impl Future + Send` (not `async fn`).
    // In Rust 1.82+ precise capturing, `async fn` captures lifetimes differently,
    // causing E0195. Fix: extract values synchronously, return a 'static async move block.
    fn from_request_parts(
        parts: &mut Parts,
        _state: &S,
    ) -> impl std::future::Future<Output = Result<Self, Self::Rejection>> + Send {
        let user_id = parts
            .headers
            .get("x-awase-user-id")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<Uuid>().ok());

        let user_role = parts
            .headers
            .get("x-awase-user-role")
            .and_then(|v| v.to_str().ok())
            .and_then(|s| s.parse::<u8>().ok());

        async move {
            let user_id = user_id.ok_or(Unauthorized)?;
            let user_role = user_role.ok_or(Unauthorized)?;
            Ok(Self { user_id, user_role })
        }
    }
}
