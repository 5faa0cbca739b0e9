//! Age-rating normalization.
//!
//! Every catalog entry is shown with a single PEGI-style label. PEGI ratings
//! are used as-is; ESRB ratings are translated to their PEGI equivalent.

use crate::igdb::AgeRating;

/// IGDB authority id for ESRB.
pub const ESRB_CATEGORY: u8 = 1;
/// IGDB authority id for PEGI.
pub const PEGI_CATEGORY: u8 = 2;

/// PEGI code for "18".
pub const PEGI_18: u8 = 5;
/// ESRB code for "AO" (adults only).
pub const ESRB_AO: u8 = 12;

pub const NOT_RATED: &str = "Not Rated";
pub const UNKNOWN_RATING: &str = "Unknown";

fn pegi_label(code: u8) -> Option<&'static str> {
    match code {
        1 => Some("PEGI 3"),
        2 => Some("PEGI 7"),
        3 => Some("PEGI 12"),
        4 => Some("PEGI 16"),
        5 => Some("PEGI 18"),
        _ => None,
    }
}

/// ESRB code to its PEGI equivalent. Rating Pending (6) has none.
fn esrb_to_pegi(code: u8) -> Option<&'static str> {
    match code {
        7 | 8 => Some("PEGI 3"), // EC, E
        9 => Some("PEGI 7"),     // E10+
        10 => Some("PEGI 12"),   // T
        11 => Some("PEGI 16"),   // M
        12 => Some("PEGI 18"),   // AO
        _ => None,
    }
}

fn find(ratings: &[AgeRating], category: u8) -> Option<&AgeRating> {
    ratings.iter().find(|r| r.category == Some(category))
}

/// Display label for a game's age ratings.
///
/// PEGI wins over ESRB. No PEGI or ESRB entry yields `"Not Rated"`; an
/// entry whose code is missing or unmapped yields `"Unknown"`.
pub fn age_rating_string(ratings: &[AgeRating]) -> String {
    let label = if let Some(pegi) = find(ratings, PEGI_CATEGORY) {
        pegi.rating.and_then(pegi_label).unwrap_or(UNKNOWN_RATING)
    } else if let Some(esrb) = find(ratings, ESRB_CATEGORY) {
        esrb.rating.and_then(esrb_to_pegi).unwrap_or(UNKNOWN_RATING)
    } else {
        NOT_RATED
    };
    label.to_string()
}

/// True when either authority classifies the game adults-only.
pub fn is_adults_only(ratings: &[AgeRating]) -> bool {
    ratings.iter().any(|r| {
        matches!(
            (r.category, r.rating),
            (Some(PEGI_CATEGORY), Some(PEGI_18)) | (Some(ESRB_CATEGORY), Some(ESRB_AO))
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pegi_code_five_is_pegi_18() {
        assert_eq!(age_rating_string(&[AgeRating::new(PEGI_CATEGORY, 5)]), "PEGI 18");
    }

    #[test]
    fn test_esrb_mature_maps_to_pegi_16() {
        assert_eq!(age_rating_string(&[AgeRating::new(ESRB_CATEGORY, 11)]), "PEGI 16");
    }

    #[test]
    fn test_pegi_preferred_over_esrb() {
        let ratings = [AgeRating::new(ESRB_CATEGORY, 11), AgeRating::new(PEGI_CATEGORY, 3)];
        assert_eq!(age_rating_string(&ratings), "PEGI 12");
    }

    #[test]
    fn test_no_ratings() {
        assert_eq!(age_rating_string(&[]), "Not Rated");
        // Only other authorities (e.g. CERO) present
        assert_eq!(age_rating_string(&[AgeRating::new(3, 2)]), "Not Rated");
    }

    #[test]
    fn test_unmapped_codes_are_unknown() {
        assert_eq!(age_rating_string(&[AgeRating::new(ESRB_CATEGORY, 6)]), "Unknown");
        assert_eq!(age_rating_string(&[AgeRating::new(PEGI_CATEGORY, 40)]), "Unknown");

        let mut missing = AgeRating::new(PEGI_CATEGORY, 1);
        missing.rating = None;
        assert_eq!(age_rating_string(&[missing]), "Unknown");
    }

    #[test]
    fn test_full_esrb_table() {
        let cases = [(7, "PEGI 3"), (8, "PEGI 3"), (9, "PEGI 7"), (10, "PEGI 12"), (12, "PEGI 18")];
        for (code, expected) in cases {
            assert_eq!(age_rating_string(&[AgeRating::new(ESRB_CATEGORY, code)]), expected);
        }
    }

    #[test]
    fn test_adults_only() {
        assert!(is_adults_only(&[AgeRating::new(PEGI_CATEGORY, PEGI_18)]));
        assert!(is_adults_only(&[AgeRating::new(ESRB_CATEGORY, ESRB_AO)]));
        assert!(!is_adults_only(&[AgeRating::new(ESRB_CATEGORY, 11)]));
        assert!(!is_adults_only(&[]));
    }
}
