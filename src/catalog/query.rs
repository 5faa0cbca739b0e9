//! Catalog list queries.
//!
//! Turns validated listing parameters into IGDB query text.

use std::str::FromStr;

use chrono::{DateTime, Duration, TimeZone, Utc};

use crate::igdb::query::GAME_FIELDS;

/// Largest page a caller may request.
pub const MAX_PAGE_SIZE: u32 = 50;
/// Page size when `limit` is omitted on listings.
pub const DEFAULT_PAGE_SIZE: u32 = 20;
/// Page size when `limit` is omitted on search.
pub const DEFAULT_SEARCH_SIZE: u32 = 10;
/// Window for the `recent` timeframe.
pub const RECENT_DAYS: i64 = 90;
/// Accepted range for the `year` filter.
pub const YEAR_RANGE: std::ops::RangeInclusive<i32> = 1970..=2100;

/// Listing order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Popularity,
    Rating,
    ReleaseDate,
    Name,
}

impl SortOrder {
    fn clause(&self) -> &'static str {
        match self {
            SortOrder::Popularity => "total_rating_count desc",
            SortOrder::Rating => "total_rating desc",
            SortOrder::ReleaseDate => "first_release_date desc",
            SortOrder::Name => "name asc",
        }
    }
}

impl FromStr for SortOrder {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "popularity" => Ok(SortOrder::Popularity),
            "rating" => Ok(SortOrder::Rating),
            "release_date" => Ok(SortOrder::ReleaseDate),
            "name" => Ok(SortOrder::Name),
            other => Err(format!(
                "sort must be one of popularity, rating, release_date, name (got '{other}')"
            )),
        }
    }
}

/// Release window filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Timeframe {
    #[default]
    All,
    /// Released within the last `RECENT_DAYS`
    Recent,
    /// Not yet released
    Upcoming,
}

impl FromStr for Timeframe {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Timeframe::All),
            "recent" => Ok(Timeframe::Recent),
            "upcoming" => Ok(Timeframe::Upcoming),
            other => Err(format!(
                "timeframe must be one of all, recent, upcoming (got '{other}')"
            )),
        }
    }
}

/// A validated catalog page request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub limit: u32,
    pub offset: u32,
    pub platforms: Vec<u32>,
    pub genres: Vec<u32>,
    pub sort: SortOrder,
    pub timeframe: Timeframe,
    pub year: Option<i32>,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            limit: DEFAULT_PAGE_SIZE,
            offset: 0,
            platforms: Vec::new(),
            genres: Vec::new(),
            sort: SortOrder::default(),
            timeframe: Timeframe::default(),
            year: None,
        }
    }
}

fn id_list(ids: &[u32]) -> String {
    ids.iter().map(u32::to_string).collect::<Vec<_>>().join(",")
}

fn year_start(year: i32) -> i64 {
    Utc.with_ymd_and_hms(year, 1, 1, 0, 0, 0)
        .single()
        .map_or(0, |dt| dt.timestamp())
}

impl CatalogQuery {
    /// IGDB query text for this page, with release windows relative to `now`.
    pub fn to_igdb_query(&self, now: DateTime<Utc>) -> String {
        let mut conditions = vec!["version_parent = null".to_string()];

        if !self.platforms.is_empty() {
            conditions.push(format!("platforms = ({})", id_list(&self.platforms)));
        }
        if !self.genres.is_empty() {
            conditions.push(format!("genres = ({})", id_list(&self.genres)));
        }

        match self.timeframe {
            Timeframe::All => {}
            Timeframe::Recent => {
                let since = (now - Duration::days(RECENT_DAYS)).timestamp();
                conditions.push(format!(
                    "first_release_date >= {} & first_release_date <= {}",
                    since,
                    now.timestamp()
                ));
            }
            Timeframe::Upcoming => {
                conditions.push(format!("first_release_date > {}", now.timestamp()));
            }
        }

        if let Some(year) = self.year {
            conditions.push(format!(
                "first_release_date >= {} & first_release_date < {}",
                year_start(year),
                year_start(year + 1)
            ));
        }

        // Popularity ordering is meaningless for unrated titles
        if self.sort == SortOrder::Popularity || self.sort == SortOrder::Rating {
            conditions.push("total_rating_count > 0".to_string());
        }

        format!(
            "fields {}; where {}; sort {}; limit {}; offset {};",
            GAME_FIELDS,
            conditions.join(" & "),
            self.sort.clause(),
            self.limit,
            self.offset
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 6, 1, 0, 0, 0).unwrap()
    }

    #[test]
    fn test_default_query() {
        let text = CatalogQuery::default().to_igdb_query(now());
        assert!(text.starts_with("fields name,summary,cover.url"));
        assert!(text.contains("where version_parent = null & total_rating_count > 0;"));
        assert!(text.contains("sort total_rating_count desc;"));
        assert!(text.ends_with("limit 20; offset 0;"));
    }

    #[test]
    fn test_filters_and_paging() {
        let query = CatalogQuery {
            limit: 5,
            offset: 10,
            platforms: vec![6, 48],
            genres: vec![12],
            sort: SortOrder::Name,
            ..CatalogQuery::default()
        };
        let text = query.to_igdb_query(now());
        assert!(text.contains("platforms = (6,48)"));
        assert!(text.contains("genres = (12)"));
        assert!(text.contains("sort name asc;"));
        assert!(!text.contains("total_rating_count > 0"));
        assert!(text.ends_with("limit 5; offset 10;"));
    }

    #[test]
    fn test_timeframes() {
        let recent = CatalogQuery {
            timeframe: Timeframe::Recent,
            ..CatalogQuery::default()
        };
        let since = (now() - Duration::days(RECENT_DAYS)).timestamp();
        assert!(recent
            .to_igdb_query(now())
            .contains(&format!("first_release_date >= {since}")));

        let upcoming = CatalogQuery {
            timeframe: Timeframe::Upcoming,
            ..CatalogQuery::default()
        };
        assert!(upcoming
            .to_igdb_query(now())
            .contains(&format!("first_release_date > {}", now().timestamp())));
    }

    #[test]
    fn test_year_window() {
        let query = CatalogQuery {
            year: Some(2020),
            ..CatalogQuery::default()
        };
        // 2020-01-01 and 2021-01-01 UTC
        assert!(query
            .to_igdb_query(now())
            .contains("first_release_date >= 1577836800 & first_release_date < 1609459200"));
    }

    #[test]
    fn test_parse_sort_and_timeframe() {
        assert_eq!("rating".parse::<SortOrder>().unwrap(), SortOrder::Rating);
        assert!("cheapest".parse::<SortOrder>().is_err());
        assert_eq!("upcoming".parse::<Timeframe>().unwrap(), Timeframe::Upcoming);
        assert!("soon".parse::<Timeframe>().is_err());
    }
}
