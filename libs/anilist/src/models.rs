use serde::{Deserialize, Serialize};

/// AniList `MediaSeason` enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum MediaSeason {
    Winter,
    Spring,
    Summer,
    Fall,
}

/// Filters for a season listing. Empty lists are left out of the query.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonFilter {
    pub year: i32,
    pub season: MediaSeason,
    pub genre_in: Vec<String>,
    pub genre_not_in: Vec<String>,
    pub tag_in: Vec<String>,
    pub tag_not_in: Vec<String>,
}

impl SeasonFilter {
    pub fn new(year: i32, season: MediaSeason) -> Self {
        Self {
            year,
            season,
            genre_in: Vec::new(),
            genre_not_in: Vec::new(),
            tag_in: Vec::new(),
            tag_not_in: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    pub has_next_page: bool,
    pub current_page: Option<i64>,
    pub last_page: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct MediaTitle {
    pub romaji: Option<String>,
    pub english: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Media {
    pub id: i64,
    #[serde(default)]
    pub title: MediaTitle,
    pub season_year: Option<i32>,
}

/// One page of a season listing.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaPage {
    pub page_info: PageInfo,
    pub media: Vec<Media>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RelationType {
    Parent,
    Prequel,
    Sequel,
    SideStory,
    Adaptation,
    Alternative,
    SpinOff,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RelationEdge {
    pub relation_type: RelationType,
    pub node: Media,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MediaTag {
    pub name: String,
    pub description: Option<String>,
    pub category: Option<String>,
    #[serde(default, skip_serializing)]
    pub is_adult: bool,
}

/// Genre names and non-adult tags known to AniList.
#[derive(Debug, Clone)]
pub struct Vocabulary {
    pub genres: Vec<String>,
    pub tags: Vec<MediaTag>,
}
