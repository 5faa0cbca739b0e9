//! Background Tasks Module
//!
//! Contains background tasks that run periodically during server operation.
//!
//! # Tasks
//! - Token refresh: keeps the shared IGDB access token valid

mod token_refresh;

pub use token_refresh::spawn_token_refresh_task;
