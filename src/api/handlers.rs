//! API Handlers
//!
//! HTTP request handlers for each storefront endpoint.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::Utc;
use tracing::debug;

use crate::catalog::{filter_catalog, CatalogEntry};
use crate::config::Config;
use crate::error::{Result, StoreError};
use crate::igdb::IgdbClient;
use crate::models::{GamesParams, HealthResponse, LoginResponse, SearchParams};

/// Application state shared across all handlers.
///
/// Holds the one IGDB client whose token every request shares.
#[derive(Clone)]
pub struct AppState {
    /// Shared IGDB proxy client
    pub igdb: IgdbClient,
}

impl AppState {
    /// Creates a new AppState around an IGDB client.
    pub fn new(igdb: IgdbClient) -> Self {
        Self { igdb }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new(IgdbClient::from_config(config)?))
    }
}

/// Handler for GET /api/games
///
/// Returns one catalog page with adult content removed and an
/// `age_rating_string` on every entry.
pub async fn list_games_handler(
    State(state): State<AppState>,
    Query(params): Query<GamesParams>,
) -> Result<Json<Vec<CatalogEntry>>> {
    let query = params.validate().map_err(StoreError::InvalidRequest)?;
    let games = state
        .igdb
        .fetch_games(&query.to_igdb_query(Utc::now()))
        .await?;

    debug!("Catalog page returned {} games", games.len());
    Ok(Json(filter_catalog(games)))
}

/// Handler for GET /api/games/search/:query
pub async fn search_games_handler(
    State(state): State<AppState>,
    Path(query): Path<String>,
    Query(params): Query<SearchParams>,
) -> Result<Json<Vec<CatalogEntry>>> {
    if query.trim().is_empty() {
        return Err(missing_query());
    }
    let limit = params.limit().map_err(StoreError::InvalidRequest)?;

    let games = state.igdb.search_games(&query, limit).await?;
    Ok(Json(filter_catalog(games)))
}

/// Handler for GET /api/games/search/ (no query segment)
pub async fn missing_search_query_handler() -> Result<Json<Vec<CatalogEntry>>> {
    Err(missing_query())
}

fn missing_query() -> StoreError {
    StoreError::InvalidRequest("Search query is required".to_string())
}

/// Handler for POST /api/auth/login
///
/// Placeholder acknowledgement; sign-in is done against Supabase directly.
pub async fn login_handler() -> Json<LoginResponse> {
    Json(LoginResponse::placeholder())
}

/// Handler for GET /health
pub async fn health_handler(State(state): State<AppState>) -> Json<HealthResponse> {
    let token_state = state.igdb.token_state().await;
    Json(HealthResponse::healthy(token_state.as_str()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::SecretString;

    fn offline_state() -> AppState {
        // Nothing listens on port 9; every upstream call fails fast
        AppState::new(IgdbClient::new(
            reqwest::Client::new(),
            "client",
            SecretString::from("secret"),
            "http://127.0.0.1:9/v4",
            "http://127.0.0.1:9/oauth2/token",
        ))
    }

    #[tokio::test]
    async fn test_list_games_rejects_bad_limit() {
        let params = GamesParams {
            limit: Some("0".to_string()),
            ..GamesParams::default()
        };
        let result = list_games_handler(State(offline_state()), Query(params)).await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_search_rejects_blank_query() {
        let result = search_games_handler(
            State(offline_state()),
            Path("   ".to_string()),
            Query(SearchParams::default()),
        )
        .await;
        assert!(matches!(result, Err(StoreError::InvalidRequest(_))));
    }

    #[tokio::test]
    async fn test_upstream_failure_propagates() {
        let result =
            list_games_handler(State(offline_state()), Query(GamesParams::default())).await;
        assert!(matches!(result, Err(StoreError::Http(_))));
    }

    #[tokio::test]
    async fn test_health_reports_token_state() {
        let response = health_handler(State(offline_state())).await;
        assert_eq!(response.status, "healthy");
        assert_eq!(response.igdb_token, "uninitialized");
    }

    #[tokio::test]
    async fn test_login_placeholder() {
        let response = login_handler().await;
        assert!(!response.message.is_empty());
    }
}
