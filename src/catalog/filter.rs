//! Adult-content exclusion for catalog pages.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;
use tracing::debug;

use super::rating::{age_rating_string, is_adults_only};
use crate::igdb::Game;

/// IGDB theme id flagged as mature content ("Erotic").
pub const FLAGGED_THEME_ID: u64 = 42;

static ADULT_KEYWORDS_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)\b(hentai|porn\w*|xxx|nsfw|erotic\w*|sex|sexual|nude|nudity|adults?\s+only)\b")
        .expect("Invalid regex")
});

/// A catalog entry as returned to the browser.
#[derive(Debug, Clone, Serialize)]
pub struct CatalogEntry {
    #[serde(flatten)]
    pub game: Game,
    pub age_rating_string: String,
}

impl From<Game> for CatalogEntry {
    fn from(game: Game) -> Self {
        let age_rating_string = age_rating_string(&game.age_ratings);
        Self {
            game,
            age_rating_string,
        }
    }
}

fn mentions_adult_content(game: &Game) -> bool {
    ADULT_KEYWORDS_RE.is_match(&game.name)
        || game
            .summary
            .as_deref()
            .is_some_and(|summary| ADULT_KEYWORDS_RE.is_match(summary))
}

/// True when a game must be hidden.
///
/// Keyword hits in the name or summary always exclude. An adults-only
/// rating excludes only together with the flagged theme.
pub fn is_excluded(game: &Game) -> bool {
    if mentions_adult_content(game) {
        return true;
    }
    is_adults_only(&game.age_ratings) && game.themes.contains(&FLAGGED_THEME_ID)
}

/// Drops excluded games and attaches the display age rating.
pub fn filter_catalog(games: Vec<Game>) -> Vec<CatalogEntry> {
    let before = games.len();
    let entries: Vec<CatalogEntry> = games
        .into_iter()
        .filter(|game| !is_excluded(game))
        .map(CatalogEntry::from)
        .collect();

    if entries.len() < before {
        debug!("Excluded {} of {} catalog entries", before - entries.len(), before);
    }
    entries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::rating::{ESRB_AO, ESRB_CATEGORY, PEGI_18, PEGI_CATEGORY};
    use crate::igdb::AgeRating;
    use serde_json::Map;

    fn game(name: &str) -> Game {
        Game {
            id: 1,
            name: name.to_string(),
            summary: None,
            cover: None,
            age_ratings: Vec::new(),
            themes: Vec::new(),
            extra: Map::new(),
        }
    }

    #[test]
    fn test_keyword_in_name_or_summary() {
        assert!(is_excluded(&game("Hentai Puzzle")));
        assert!(is_excluded(&game("NSFW Tales")));

        let mut g = game("Harmless Title");
        g.summary = Some("Contains explicit NUDITY".to_string());
        assert!(is_excluded(&g));
    }

    #[test]
    fn test_keywords_are_word_bounded() {
        assert!(!is_excluded(&game("Essex Racing")));
        assert!(!is_excluded(&game("Sussex Farm Simulator")));
        assert!(!is_excluded(&game("The Sexy Brutale")));
    }

    #[test]
    fn test_adult_rating_alone_is_kept() {
        let mut g = game("Grim Shooter");
        g.age_ratings = vec![AgeRating::new(PEGI_CATEGORY, PEGI_18)];
        assert!(!is_excluded(&g));
    }

    #[test]
    fn test_flagged_theme_alone_is_kept() {
        let mut g = game("Romance Story");
        g.themes = vec![FLAGGED_THEME_ID];
        assert!(!is_excluded(&g));
    }

    #[test]
    fn test_adult_rating_with_flagged_theme_is_excluded() {
        let mut g = game("Romance Story");
        g.themes = vec![1, FLAGGED_THEME_ID];
        g.age_ratings = vec![AgeRating::new(ESRB_CATEGORY, ESRB_AO)];
        assert!(is_excluded(&g));
    }

    #[test]
    fn test_filter_attaches_rating_string() {
        let mut rated = game("Space Trader");
        rated.age_ratings = vec![AgeRating::new(ESRB_CATEGORY, 11)];

        let entries = filter_catalog(vec![rated, game("Porn Quest"), game("Plain")]);
        assert_eq!(entries.len(), 2);
        assert_eq!(entries[0].age_rating_string, "PEGI 16");
        assert_eq!(entries[1].age_rating_string, "Not Rated");

        let json = serde_json::to_value(&entries[0]).unwrap();
        assert_eq!(json["name"], "Space Trader");
        assert_eq!(json["age_rating_string"], "PEGI 16");
    }
}
