//! REST API types for the web client.
//!
//! `/config.json` returns [`crate::ResolvedSettings`] directly; the types
//! here cover the remaining endpoints.

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::models::EnvironmentMode;

/// Health check payload.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    /// Always "ok" when the server answers
    pub status: String,
    pub service: String,
    pub version: String,
    /// Mode the bundle resolves to right now
    pub mode: EnvironmentMode,
}

impl HealthResponse {
    pub fn ok(mode: EnvironmentMode) -> Self {
        Self {
            status: "ok".to_string(),
            service: "client-settings".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            mode,
        }
    }
}

/// Create an error response
pub fn error_response(error: &str) -> Value {
    json!({
        "status": "error",
        "error": error,
    })
}
