//! IGDB query text helpers.
//!
//! The IGDB query language has no parameter binding, so user input is
//! escaped and interpolated into the query text here.

/// Fields requested for every catalog query.
pub const GAME_FIELDS: &str = "name,summary,cover.url,first_release_date,total_rating,\
total_rating_count,genres.name,platforms.name,age_ratings.category,age_ratings.rating,themes";

/// Escapes a search term for embedding inside a quoted IGDB string.
///
/// The term is trimmed, double quotes are escaped, then smart single
/// quotes are normalized to a plain apostrophe. The order matters: the
/// escape pass only ever sees the raw input.
pub fn escape_search_term(raw: &str) -> String {
    raw.trim()
        .replace('"', "\\\"")
        .replace(['\u{2018}', '\u{2019}'], "'")
}

/// Builds a `search` query for the games endpoint.
pub fn search_query(term: &str, limit: u32) -> String {
    format!(
        "search \"{}\"; fields {}; limit {};",
        escape_search_term(term),
        GAME_FIELDS,
        limit
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_trims_and_escapes_quotes() {
        assert_eq!(escape_search_term("  zelda  "), "zelda");
        assert_eq!(escape_search_term(r#"the "best" game"#), r#"the \"best\" game"#);
    }

    #[test]
    fn test_escape_normalizes_smart_quotes() {
        assert_eq!(escape_search_term("Assassin\u{2019}s Creed"), "Assassin's Creed");
        assert_eq!(escape_search_term("\u{2018}quoted\u{2019}"), "'quoted'");
    }

    #[test]
    fn test_search_query_text() {
        let query = search_query(" Baldur\u{2019}s Gate ", 10);
        assert!(query.starts_with("search \"Baldur's Gate\"; fields name,summary,cover.url"));
        assert!(query.ends_with("limit 10;"));
    }
}
