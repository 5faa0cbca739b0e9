//! API Routes
//!
//! Configures the Axum router with all storefront endpoints.

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    health_handler, list_games_handler, login_handler, missing_search_query_handler,
    search_games_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /api/games` - Filtered catalog page
/// - `GET /api/games/search/:query` - Catalog search
/// - `POST /api/auth/login` - Login placeholder
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (the browser storefront is served elsewhere)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/api/games", get(list_games_handler))
        .route("/api/games/search/", get(missing_search_query_handler))
        .route("/api/games/search/:query", get(search_games_handler))
        .route("/api/auth/login", post(login_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
