//! IGDB Token Refresh Task
//!
//! Background task that keeps the shared IGDB token warm so user requests
//! rarely pay for a token acquisition.

use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::igdb::IgdbClient;

/// Spawns a background task that acquires the IGDB token at startup and
/// re-checks it every `interval_secs`.
///
/// A still-valid token is left alone; a missing or expired one is fetched
/// through the client's single-flight refresh, so this task never races
/// request handlers for a second token. Failures are logged and retried on
/// the next tick.
///
/// # Returns
/// A JoinHandle for the spawned task, which can be used to abort the task
/// during graceful shutdown.
///
/// # Example
/// ```ignore
/// let handle = spawn_token_refresh_task(state.igdb.clone(), 300);
/// // Later, during shutdown:
/// handle.abort();
/// ```
pub fn spawn_token_refresh_task(client: IgdbClient, interval_secs: u64) -> JoinHandle<()> {
    let interval = Duration::from_secs(interval_secs.max(1));

    tokio::spawn(async move {
        info!(
            "Starting IGDB token refresh task with interval of {} seconds",
            interval_secs
        );

        loop {
            let before = client.token_state().await;
            match client.ensure_token().await {
                Ok(_) => debug!("IGDB token check: was {}", before.as_str()),
                Err(e) => warn!("IGDB token refresh failed: {}", e),
            }

            tokio::time::sleep(interval).await;
        }
    })
}
