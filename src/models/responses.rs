//! Response DTOs for the storefront API
//!
//! Defines the structure of outgoing HTTP response bodies.

use serde::Serialize;

/// Response body for the health endpoint (GET /health)
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    /// Health status (e.g., "healthy")
    pub status: String,
    /// Current timestamp in ISO 8601 format
    pub timestamp: String,
    /// IGDB token lifecycle state
    pub igdb_token: String,
}

impl HealthResponse {
    /// Creates a new HealthResponse with current timestamp
    pub fn healthy(igdb_token: impl Into<String>) -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
            igdb_token: igdb_token.into(),
        }
    }
}

/// Response body for the login placeholder (POST /api/auth/login)
#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
}

impl LoginResponse {
    /// Acknowledgement only; sign-in happens against Supabase directly.
    pub fn placeholder() -> Self {
        Self {
            message: "Login endpoint - authentication is handled by Supabase".to_string(),
        }
    }
}
