//! IGDB API client.
//!
//! A single shared client fronts every route handler. It owns the bearer
//! token, acquires it on first use or after expiry, and retries a request
//! exactly once when IGDB answers 401.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::ACCEPT;
use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::models::Game;
use super::query::search_query;
use super::token::{request_token, IgdbSession, TokenState};
use crate::config::Config;
use crate::error::{Result, StoreError};

/// IGDB API client with automatic token management.
///
/// Cloning is cheap; all clones share one token.
#[derive(Clone)]
pub struct IgdbClient {
    inner: Arc<IgdbClientInner>,
}

struct IgdbClientInner {
    http: reqwest::Client,
    client_id: String,
    client_secret: SecretString,
    /// Base URL, e.g. `https://api.igdb.com/v4`
    api_url: String,
    token_url: String,
    /// Current token, None until the first acquisition
    session: RwLock<Option<IgdbSession>>,
    /// Held while a token is being acquired so concurrent callers share one
    /// exchange
    refresh_lock: Mutex<()>,
}

impl IgdbClient {
    /// Creates a client with no token.
    pub fn new(
        http: reqwest::Client,
        client_id: impl Into<String>,
        client_secret: SecretString,
        api_url: impl Into<String>,
        token_url: impl Into<String>,
    ) -> Self {
        Self {
            inner: Arc::new(IgdbClientInner {
                http,
                client_id: client_id.into(),
                client_secret,
                api_url: api_url.into().trim_end_matches('/').to_string(),
                token_url: token_url.into(),
                session: RwLock::new(None),
                refresh_lock: Mutex::new(()),
            }),
        }
    }

    /// Creates a client from server configuration.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Config` if the HTTP client cannot be built.
    pub fn from_config(config: &Config) -> Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(config.upstream_timeout())
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|e| StoreError::Config(format!("HTTP client: {e}")))?;

        Ok(Self::new(
            http,
            config.igdb_client_id.clone(),
            config.igdb_client_secret.clone(),
            config.igdb_api_url.clone(),
            config.twitch_token_url.clone(),
        ))
    }

    // =========================================================================
    // Token management
    // =========================================================================

    /// Where the shared token is in its lifecycle.
    pub async fn token_state(&self) -> TokenState {
        match self.inner.session.read().await.as_ref() {
            None => TokenState::Uninitialized,
            Some(session) if session.is_expired() => TokenState::Expired,
            Some(_) => TokenState::Valid,
        }
    }

    /// Replaces the current session (e.g. one restored from elsewhere).
    pub async fn install_session(&self, session: IgdbSession) {
        *self.inner.session.write().await = Some(session);
    }

    async fn current_token(&self) -> Option<SecretString> {
        self.inner
            .session
            .read()
            .await
            .as_ref()
            .filter(|session| !session.is_expired())
            .map(|session| session.access_token().clone())
    }

    /// Returns a usable token, acquiring one if none is held or it expired.
    pub async fn ensure_token(&self) -> Result<SecretString> {
        if let Some(token) = self.current_token().await {
            return Ok(token);
        }
        self.refresh_token(None).await
    }

    /// Acquires a new token unless another caller already replaced the one
    /// we have (`rejected`, or an expired/missing token when None).
    async fn refresh_token(&self, rejected: Option<&SecretString>) -> Result<SecretString> {
        let _flight = self.inner.refresh_lock.lock().await;

        if let Some(current) = self.current_token().await {
            let superseded = match rejected {
                Some(old) => old.expose_secret() != current.expose_secret(),
                None => true,
            };
            if superseded {
                debug!("Reusing IGDB token refreshed by a concurrent request");
                return Ok(current);
            }
        }

        let session = request_token(
            &self.inner.http,
            &self.inner.token_url,
            &self.inner.client_id,
            &self.inner.client_secret,
        )
        .await?;
        info!("IGDB token refreshed, expires at {}", session.expires_at());

        let token = session.access_token().clone();
        *self.inner.session.write().await = Some(session);
        Ok(token)
    }

    // =========================================================================
    // Requests
    // =========================================================================

    /// Runs a query against an IGDB endpoint and decodes the JSON result.
    ///
    /// A 401 triggers one token refresh and one retry; a second 401 is
    /// returned as `StoreError::Unauthorized`.
    #[instrument(skip(self, query))]
    pub async fn execute_request<T: DeserializeOwned>(&self, endpoint: &str, query: &str) -> Result<T> {
        let token = self.ensure_token().await?;
        let mut response = self.send(endpoint, query, &token).await?;

        if response.status() == StatusCode::UNAUTHORIZED {
            warn!("IGDB rejected token for /{}, refreshing and retrying once", endpoint);
            let fresh = self.refresh_token(Some(&token)).await?;
            response = self.send(endpoint, query, &fresh).await?;
        }

        let status = response.status();
        if status.is_success() {
            return Ok(response.json().await?);
        }

        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        if status == StatusCode::UNAUTHORIZED {
            Err(StoreError::Unauthorized(body))
        } else {
            Err(StoreError::Upstream {
                status: status.as_u16(),
                body,
            })
        }
    }

    async fn send(&self, endpoint: &str, query: &str, token: &SecretString) -> Result<reqwest::Response> {
        let url = format!("{}/{}", self.inner.api_url, endpoint.trim_start_matches('/'));
        debug!("POST {} : {}", url, query);

        let response = self
            .inner
            .http
            .post(url)
            .header("Client-ID", &self.inner.client_id)
            .header(ACCEPT, "application/json")
            .bearer_auth(token.expose_secret())
            .body(query.to_string())
            .send()
            .await?;

        Ok(response)
    }

    /// Runs a `games` query and upgrades every cover URL.
    pub async fn fetch_games(&self, query: &str) -> Result<Vec<Game>> {
        let mut games: Vec<Game> = self.execute_request("games", query).await?;
        for game in &mut games {
            game.upgrade_cover();
        }
        Ok(games)
    }

    /// Full-text search over games.
    pub async fn search_games(&self, term: &str, limit: u32) -> Result<Vec<Game>> {
        self.fetch_games(&search_query(term, limit)).await
    }
}
