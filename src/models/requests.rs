//! Request DTOs for the storefront API
//!
//! Query strings arrive as raw text so validation failures can be reported
//! with a JSON message instead of the framework's plain-text rejection.

use serde::Deserialize;

use crate::catalog::query::{DEFAULT_PAGE_SIZE, DEFAULT_SEARCH_SIZE, MAX_PAGE_SIZE, YEAR_RANGE};
use crate::catalog::{CatalogQuery, SortOrder, Timeframe};

/// Query string for `GET /api/games`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GamesParams {
    pub limit: Option<String>,
    pub offset: Option<String>,
    /// Comma-separated platform ids
    pub platforms: Option<String>,
    /// Comma-separated genre ids
    pub genres: Option<String>,
    pub sort: Option<String>,
    pub timeframe: Option<String>,
    pub year: Option<String>,
}

/// Query string for `GET /api/games/search/:query`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SearchParams {
    pub limit: Option<String>,
}

/// Treats empty values (`?sort=`) like absent ones.
fn present(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|v| !v.is_empty())
}

fn parse_limit(raw: &Option<String>, default: u32) -> Result<u32, String> {
    let Some(raw) = present(raw) else {
        return Ok(default);
    };
    match raw.parse::<i64>() {
        Ok(limit) if (1..=i64::from(MAX_PAGE_SIZE)).contains(&limit) => Ok(limit as u32),
        _ => Err(format!("limit must be between 1 and {MAX_PAGE_SIZE}")),
    }
}

fn parse_ids(name: &str, raw: &Option<String>) -> Result<Vec<u32>, String> {
    let Some(raw) = present(raw) else {
        return Ok(Vec::new());
    };
    raw.split(',')
        .map(str::trim)
        .filter(|id| !id.is_empty())
        .map(|id| {
            id.parse::<u32>()
                .map_err(|_| format!("{name} must be a comma-separated list of ids"))
        })
        .collect()
}

impl GamesParams {
    /// Validates the parameters.
    ///
    /// Returns the error message on failure.
    pub fn validate(&self) -> Result<CatalogQuery, String> {
        let offset = match present(&self.offset) {
            None => 0,
            Some(raw) => match raw.parse::<i64>() {
                Ok(offset) if offset >= 0 => {
                    u32::try_from(offset).map_err(|_| "offset is too large".to_string())?
                }
                _ => return Err("offset must be a non-negative integer".to_string()),
            },
        };

        let year = match present(&self.year) {
            None => None,
            Some(raw) => match raw.parse::<i32>() {
                Ok(year) if YEAR_RANGE.contains(&year) => Some(year),
                _ => {
                    return Err(format!(
                        "year must be between {} and {}",
                        YEAR_RANGE.start(),
                        YEAR_RANGE.end()
                    ))
                }
            },
        };

        Ok(CatalogQuery {
            limit: parse_limit(&self.limit, DEFAULT_PAGE_SIZE)?,
            offset,
            platforms: parse_ids("platforms", &self.platforms)?,
            genres: parse_ids("genres", &self.genres)?,
            sort: present(&self.sort)
                .map(str::parse::<SortOrder>)
                .transpose()?
                .unwrap_or_default(),
            timeframe: present(&self.timeframe)
                .map(str::parse::<Timeframe>)
                .transpose()?
                .unwrap_or_default(),
            year,
        })
    }
}

impl SearchParams {
    /// Validated page size for a search.
    pub fn limit(&self) -> Result<u32, String> {
        parse_limit(&self.limit, DEFAULT_SEARCH_SIZE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(query: &str) -> GamesParams {
        serde_json::from_value(
            serde_json::Value::Object(
                query
                    .split('&')
                    .filter_map(|pair| pair.split_once('='))
                    .map(|(k, v)| (k.to_string(), serde_json::Value::String(v.to_string())))
                    .collect(),
            ),
        )
        .unwrap()
    }

    #[test]
    fn test_defaults() {
        let query = GamesParams::default().validate().unwrap();
        assert_eq!(query, CatalogQuery::default());
    }

    #[test]
    fn test_full_parameters() {
        let query = params("limit=50&offset=40&platforms=6, 48&genres=12&sort=name&timeframe=recent&year=2021")
            .validate()
            .unwrap();
        assert_eq!(query.limit, 50);
        assert_eq!(query.offset, 40);
        assert_eq!(query.platforms, vec![6, 48]);
        assert_eq!(query.genres, vec![12]);
        assert_eq!(query.sort, SortOrder::Name);
        assert_eq!(query.timeframe, Timeframe::Recent);
        assert_eq!(query.year, Some(2021));
    }

    #[test]
    fn test_limit_bounds() {
        assert!(params("limit=0").validate().is_err());
        assert!(params("limit=51").validate().is_err());
        assert!(params("limit=abc").validate().is_err());
        assert_eq!(params("limit=1").validate().unwrap().limit, 1);
    }

    #[test]
    fn test_offset_must_be_non_negative() {
        let err = params("offset=-1").validate().unwrap_err();
        assert!(err.contains("offset"));
        assert_eq!(params("offset=0").validate().unwrap().offset, 0);
    }

    #[test]
    fn test_bad_values_rejected() {
        assert!(params("platforms=6,pc").validate().is_err());
        assert!(params("sort=cheapest").validate().is_err());
        assert!(params("timeframe=soon").validate().is_err());
        assert!(params("year=1800").validate().is_err());
    }

    #[test]
    fn test_empty_values_use_defaults() {
        let query = params("sort=&limit=").validate().unwrap();
        assert_eq!(query.sort, SortOrder::Popularity);
        assert_eq!(query.limit, DEFAULT_PAGE_SIZE);
    }

    #[test]
    fn test_search_limit() {
        assert_eq!(SearchParams::default().limit().unwrap(), DEFAULT_SEARCH_SIZE);
        let params = SearchParams {
            limit: Some("99".to_string()),
        };
        assert!(params.limit().is_err());
    }
}
