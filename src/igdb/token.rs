//! IGDB Token Module
//!
//! Client-credentials token acquisition against the Twitch OAuth endpoint
//! and the session record the proxy keeps between requests.

use chrono::{DateTime, Duration, Utc};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};

use crate::error::{Result, StoreError};

/// Seconds shaved off the provider-declared lifetime.
pub const EXPIRY_SAFETY_MARGIN_SECS: i64 = 3600;

// == IGDB Session ==
/// A bearer token and the moment it should stop being used.
#[derive(Debug, Clone)]
pub struct IgdbSession {
    access_token: SecretString,
    expires_at: DateTime<Utc>,
}

impl IgdbSession {
    /// Creates a session with an explicit expiry.
    pub fn new(access_token: SecretString, expires_at: DateTime<Utc>) -> Self {
        Self {
            access_token,
            expires_at,
        }
    }

    /// Creates a session from a token grant.
    ///
    /// Expiry is `issued_at + expires_in - 1h`.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Internal` when the declared lifetime does not fit
    /// in a timestamp.
    pub fn from_grant(
        access_token: SecretString,
        expires_in: i64,
        issued_at: DateTime<Utc>,
    ) -> Result<Self> {
        let expires_at = expires_in
            .checked_sub(EXPIRY_SAFETY_MARGIN_SECS)
            .and_then(Duration::try_seconds)
            .and_then(|lifetime| issued_at.checked_add_signed(lifetime))
            .ok_or_else(|| {
                StoreError::Internal(format!("token lifetime out of range: {expires_in}s"))
            })?;
        Ok(Self::new(access_token, expires_at))
    }

    pub fn access_token(&self) -> &SecretString {
        &self.access_token
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    /// Expired once `now >= expires_at`.
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }

    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

// == Token State ==
/// Lifecycle of the shared token: `Uninitialized -> Valid <-> Expired`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    Uninitialized,
    Valid,
    Expired,
}

impl TokenState {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenState::Uninitialized => "uninitialized",
            TokenState::Valid => "valid",
            TokenState::Expired => "expired",
        }
    }
}

/// Response from the OAuth token endpoint.
#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
    /// Token lifetime in seconds.
    expires_in: i64,
}

// == Acquisition ==
/// Exchanges client credentials for a bearer token.
///
/// # Errors
///
/// Returns `StoreError::Unauthorized` when the provider rejects the
/// credentials and `StoreError::Upstream` for any other failure status.
#[instrument(skip(client, client_secret), fields(client_id = %client_id))]
pub async fn request_token(
    client: &reqwest::Client,
    token_url: &str,
    client_id: &str,
    client_secret: &SecretString,
) -> Result<IgdbSession> {
    let issued_at = Utc::now();

    let response = client
        .post(token_url)
        .query(&[
            ("client_id", client_id),
            ("client_secret", client_secret.expose_secret()),
            ("grant_type", "client_credentials"),
        ])
        .send()
        .await?;

    let status = response.status();

    if status.is_success() {
        let grant: TokenResponse = response.json().await?;
        debug!("Obtained IGDB token valid for {}s", grant.expires_in);

        IgdbSession::from_grant(
            SecretString::from(grant.access_token),
            grant.expires_in,
            issued_at,
        )
    } else {
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());

        if status == reqwest::StatusCode::UNAUTHORIZED || status == reqwest::StatusCode::FORBIDDEN {
            Err(StoreError::Unauthorized(format!(
                "Token request rejected: {body}"
            )))
        } else {
            Err(StoreError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }
}
