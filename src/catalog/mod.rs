//! Catalog Module
//!
//! Route-layer catalog logic: query building, adult-content exclusion,
//! age-rating labels and search debouncing.

mod debounce;
pub mod filter;
pub mod query;
pub mod rating;

pub use debounce::{SearchDebouncer, MIN_SEARCH_CHARS, SEARCH_DEBOUNCE};
pub use filter::{filter_catalog, is_excluded, CatalogEntry};
pub use query::{CatalogQuery, SortOrder, Timeframe};
pub use rating::age_rating_string;
