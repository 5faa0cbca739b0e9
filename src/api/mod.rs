//! API Module
//!
//! HTTP handlers and routing for the storefront REST API.
//!
//! # Endpoints
//! - `GET /api/games` - Filtered, rating-labelled catalog page
//! - `GET /api/games/search/:query` - Catalog search
//! - `POST /api/auth/login` - Login placeholder
//! - `GET /health` - Health check endpoint

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
