//! IGDB Module
//!
//! Token-refreshing proxy client for the IGDB catalog API.

mod client;
pub mod models;
pub mod query;
mod token;

pub use client::IgdbClient;
pub use models::{upgrade_cover_url, AgeRating, Cover, Game};
pub use query::escape_search_term;
pub use token::{request_token, IgdbSession, TokenState, EXPIRY_SAFETY_MARGIN_SECS};
