// src/models/account.rs

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::permissions::Capabilities;

/// The signed-in account, as reported by the upstream `auth/me` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Account {
    pub id: i64,
    pub username: String,
    #[serde(default)]
    pub role: Option<String>,
    /// Raw `resource:action` permission strings.
    #[serde(default)]
    pub permissions: Vec<String>,
}

/// Response of the capabilities endpoint.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct CapabilitiesResponse {
    pub account_id: i64,
    pub username: String,
    /// Recognised permissions, normalised and sorted.
    pub permissions: Vec<String>,
    pub capabilities: Capabilities,
}
