use serde::{Deserialize, Serialize};

/// Series already in the library.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Series {
    pub id: i64,
    pub title: String,
    pub tvdb_id: i64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RootFolder {
    pub id: i64,
    pub path: String,
}

/// Quality and language profiles share this shape.
#[derive(Debug, Clone, Deserialize)]
pub struct QualityProfile {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tag {
    #[serde(default, skip_serializing)]
    pub id: i64,
    pub label: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportListExclusion {
    pub tvdb_id: i64,
    #[serde(default)]
    pub title: Option<String>,
}

/// Which episodes to monitor when a series is added.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum MonitorType {
    #[default]
    All,
    Future,
    Missing,
    Existing,
    Pilot,
    FirstSeason,
    LatestSeason,
    None,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SeriesType {
    #[serde(alias = "Standard")]
    Standard,
    #[serde(alias = "Daily")]
    Daily,
    #[default]
    #[serde(alias = "Anime")]
    Anime,
}
