// src/handlers/session.rs

use axum::{Json, extract::State, response::IntoResponse};
use serde_json::json;

use crate::{
    error::AppError,
    models::account::CapabilitiesResponse,
    permissions::{Capabilities, PermissionSet},
    upstream::SharedBackend,
    utils::auth::Credentials,
};

/// Liveness probe. Does not touch the upstream backend.
#[utoipa::path(get, path = "/api/health", responses((status = 200)))]
pub async fn health() -> impl IntoResponse {
    Json(json!({ "status": "ok" }))
}

/// Resolves the signed-in account's permissions into screen capabilities.
///
/// The upstream backend authenticates the forwarded credentials; an
/// anonymous caller gets whatever status it answers with (usually 401).
#[utoipa::path(
    get,
    path = "/api/session/capabilities",
    responses((status = 200, body = CapabilitiesResponse), (status = 401))
)]
pub async fn capabilities(
    State(backend): State<SharedBackend>,
    creds: Credentials,
) -> Result<impl IntoResponse, AppError> {
    let account = backend.current_account(&creds).await?;
    let permissions = PermissionSet::from_strings(&account.permissions);

    if permissions.is_empty() && !account.permissions.is_empty() {
        tracing::warn!(
            "Account {} carries no recognised permissions ({} raw entries)",
            account.id,
            account.permissions.len()
        );
    }

    Ok(Json(CapabilitiesResponse {
        account_id: account.id,
        username: account.username,
        permissions: permissions.to_strings(),
        capabilities: Capabilities::from(&permissions),
    }))
}
