//! IGDB payload types.
//!
//! Only the fields the proxy and route layer read are typed; everything else
//! the API returns is carried through untouched.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A `games` record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Game {
    pub id: u64,
    #[serde(default)]
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cover: Option<Cover>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub age_ratings: Vec<AgeRating>,
    /// Theme ids
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub themes: Vec<u64>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Game {
    /// Rewrites the cover to the large size over https.
    pub fn upgrade_cover(&mut self) {
        if let Some(url) = self.cover.as_mut().and_then(|cover| cover.url.as_mut()) {
            *url = upgrade_cover_url(url);
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cover {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// One age classification. `category` names the authority, `rating` the
/// authority-specific code.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeRating {
    #[serde(default)]
    pub category: Option<u8>,
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl AgeRating {
    pub fn new(category: u8, rating: u8) -> Self {
        Self {
            category: Some(category),
            rating: Some(rating),
            extra: Map::new(),
        }
    }
}

/// Swaps the thumbnail size token for the large cover and forces https.
///
/// IGDB hands out protocol-relative URLs (`//images.igdb.com/...`), which
/// get an explicit `https:` prefix.
pub fn upgrade_cover_url(url: &str) -> String {
    let sized = url.replace("t_thumb", "t_cover_big");
    if let Some(rest) = sized.strip_prefix("http://") {
        format!("https://{rest}")
    } else if sized.starts_with("//") {
        format!("https:{sized}")
    } else {
        sized
    }
}
