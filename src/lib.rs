//! Game Storefront - IGDB catalog proxy and shopping cart engine
//!
//! Serves a filtered, age-rated game catalog over a token-managed IGDB proxy
//! and provides the cart and checkout state machine used by the storefront.

pub mod api;
pub mod cart;
pub mod catalog;
pub mod config;
pub mod error;
pub mod igdb;
pub mod models;
pub mod supabase;
pub mod tasks;

pub use api::AppState;
pub use config::Config;
pub use tasks::spawn_token_refresh_task;
