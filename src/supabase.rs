//! Supabase REST adapter.
//!
//! Resolves the signed-in user through the auth API and writes orders through
//! the PostgREST endpoint. Only the two calls checkout needs are covered.

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::cart::{Order, OrderBackend};
use crate::error::{Result, StoreError};

/// Table receiving checkout orders.
const ORDERS_TABLE: &str = "orders";

#[derive(Deserialize)]
struct AuthUser {
    id: Uuid,
}

/// Order backend talking to a Supabase project over HTTP.
#[derive(Clone)]
pub struct SupabaseBackend {
    http: reqwest::Client,
    /// Project URL, e.g. `https://xyz.supabase.co`
    url: String,
    anon_key: SecretString,
    /// User access token; None means nobody is signed in
    access_token: Option<SecretString>,
}

impl SupabaseBackend {
    pub fn new(http: reqwest::Client, url: impl Into<String>, anon_key: SecretString) -> Self {
        Self {
            http,
            url: url.into().trim_end_matches('/').to_string(),
            anon_key,
            access_token: None,
        }
    }

    /// Acts on behalf of the user owning `access_token`.
    #[must_use]
    pub fn with_session(mut self, access_token: SecretString) -> Self {
        self.access_token = Some(access_token);
        self
    }

    fn bearer(&self) -> &SecretString {
        self.access_token.as_ref().unwrap_or(&self.anon_key)
    }

    async fn upstream_error(response: reqwest::Response) -> StoreError {
        let status = response.status().as_u16();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Unknown error".to_string());
        StoreError::Upstream { status, body }
    }
}

impl OrderBackend for SupabaseBackend {
    #[instrument(skip(self))]
    async fn current_user(&self) -> Result<Option<Uuid>> {
        let Some(token) = &self.access_token else {
            return Ok(None);
        };

        let response = self
            .http
            .get(format!("{}/auth/v1/user", self.url))
            .header("apikey", self.anon_key.expose_secret())
            .bearer_auth(token.expose_secret())
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {
                let user: AuthUser = response.json().await?;
                Ok(Some(user.id))
            }
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Supabase session rejected");
                Ok(None)
            }
            _ => Err(Self::upstream_error(response).await),
        }
    }

    #[instrument(skip(self, order), fields(order_id = %order.order_id))]
    async fn insert_order(&self, order: &Order) -> Result<()> {
        let response = self
            .http
            .post(format!("{}/rest/v1/{}", self.url, ORDERS_TABLE))
            .header("apikey", self.anon_key.expose_secret())
            .header("Prefer", "return=minimal")
            .bearer_auth(self.bearer().expose_secret())
            .json(order)
            .send()
            .await?;

        if response.status().is_success() {
            Ok(())
        } else {
            Err(Self::upstream_error(response).await)
        }
    }
}
