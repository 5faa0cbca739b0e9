//! Error types for the storefront
//!
//! Provides unified error handling using thiserror. `StoreError` covers the
//! server side (route validation, IGDB proxy, Supabase adapter); `CartError`
//! covers the client-side cart and checkout flow.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;
use tracing::error;

// == Store Error Enum ==
/// Unified error type for the proxy server and remote backends.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Invalid query parameters or request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// Upstream rejected our credentials (after the single retry)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Upstream answered with a non-success status
    #[error("Upstream error ({status}): {body}")]
    Upstream { status: u16, body: String },

    /// Transport or decoding failure talking to an upstream
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Missing or malformed configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Internal server error
    #[error("Internal error: {0}")]
    Internal(String),
}

// == IntoResponse Implementation ==
impl IntoResponse for StoreError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            StoreError::InvalidRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            other => {
                // Upstream detail stays in the logs
                error!("Request failed: {}", other);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Internal server error".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": message
        }));

        (status, body).into_response()
    }
}

// == Result Type Alias ==
/// Convenience Result type for the server and backends.
pub type Result<T> = std::result::Result<T, StoreError>;

// == Cart Error Enum ==
/// Failures surfaced inline by the cart and checkout flow.
#[derive(Error, Debug)]
pub enum CartError {
    /// Checkout attempted with nothing in the cart
    #[error("Your cart is empty")]
    EmptyCart,

    /// Price text did not contain a usable amount
    #[error("Invalid price: {0}")]
    InvalidPrice(String),

    /// No cart row with the given title
    #[error("Item not found in cart: {0}")]
    ItemNotFound(String),

    /// No authenticated user session at confirmation time
    #[error("Please log in to complete your purchase")]
    NotAuthenticated,

    /// Remote order insert failed
    #[error("Order failed: {0}")]
    OrderFailed(String),

    /// The cart cannot be closed or mutated while an order is being placed
    #[error("Checkout is already in progress")]
    CheckoutInProgress,

    /// Operation not valid from the current checkout state
    #[error("Cannot {action} while {state}")]
    InvalidTransition {
        action: &'static str,
        state: &'static str,
    },

    /// Cart snapshot could not be read or written
    #[error("Cart storage error: {0}")]
    Storage(String),
}

/// Convenience Result type for cart operations.
pub type CartResult<T> = std::result::Result<T, CartError>;
