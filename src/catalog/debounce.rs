//! Search-as-you-type debouncing.
//!
//! Each keystroke calls `settle`; only the call that is still the latest
//! after the quiet period gets its query back. Responses are not sequenced:
//! a slow response for an older query can still land after a newer one.

use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

/// Quiet period before a search fires.
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);
/// Shortest query worth sending.
pub const MIN_SEARCH_CHARS: usize = 3;

#[derive(Debug)]
pub struct SearchDebouncer {
    delay: Duration,
    min_chars: usize,
    generation: AtomicU64,
}

impl Default for SearchDebouncer {
    fn default() -> Self {
        Self::new(SEARCH_DEBOUNCE, MIN_SEARCH_CHARS)
    }
}

impl SearchDebouncer {
    pub fn new(delay: Duration, min_chars: usize) -> Self {
        Self {
            delay,
            min_chars,
            generation: AtomicU64::new(0),
        }
    }

    /// Waits out the quiet period for `input`.
    ///
    /// Returns the trimmed query if no newer input arrived meanwhile and it
    /// is at least `min_chars` characters long.
    pub async fn settle(&self, input: &str) -> Option<String> {
        let ticket = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        tokio::time::sleep(self.delay).await;

        if self.generation.load(Ordering::SeqCst) != ticket {
            return None;
        }

        let query = input.trim();
        if query.chars().count() < self.min_chars {
            return None;
        }
        Some(query.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_single_input_fires() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(20), MIN_SEARCH_CHARS);
        assert_eq!(debouncer.settle("  zelda ").await.as_deref(), Some("zelda"));
    }

    #[tokio::test]
    async fn test_short_input_is_dropped() {
        let debouncer = SearchDebouncer::new(Duration::from_millis(20), MIN_SEARCH_CHARS);
        assert!(debouncer.settle("ze").await.is_none());
        assert!(debouncer.settle("   ").await.is_none());
    }

    #[tokio::test]
    async fn test_only_latest_keystroke_fires() {
        let debouncer = Arc::new(SearchDebouncer::new(Duration::from_millis(100), MIN_SEARCH_CHARS));

        let first = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("mar").await })
        };
        tokio::time::sleep(Duration::from_millis(20)).await;
        let second = {
            let debouncer = debouncer.clone();
            tokio::spawn(async move { debouncer.settle("mario").await })
        };

        assert!(first.await.unwrap().is_none());
        assert_eq!(second.await.unwrap().as_deref(), Some("mario"));
    }

    #[test]
    fn test_defaults() {
        let debouncer = SearchDebouncer::default();
        assert_eq!(debouncer.delay, Duration::from_millis(300));
        assert_eq!(debouncer.min_chars, 3);
    }
}
