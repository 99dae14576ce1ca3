use std::path::{Path, PathBuf};

use resolver::{Season, SeasonQuery, DEFAULT_MAX_CHAIN_DEPTH, DEFAULT_TARGET_COUNTRIES};
use serde::Deserialize;
use sonarr::{AddOptions, MonitorType, SeriesType};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Missing required setting `{0}`")]
    Missing(&'static str),
}

/// Settings read from `config.toml`.
///
/// Upper-case section names and the `tmdb-api-key` / `sonarr-api-key` keys
/// of older config files are accepted too.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Settings {
    #[serde(default, alias = "ANILIST")]
    pub anilist: AnilistSettings,
    #[serde(default, alias = "TMDB")]
    pub tmdb: TmdbSettings,
    #[serde(default, alias = "SONARR")]
    pub sonarr: SonarrSettings,
    #[serde(default, alias = "SCRIPT")]
    pub script: ScriptSettings,
}

/// Season listing filters, by AniList genre and tag name.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct AnilistSettings {
    #[serde(default)]
    pub includes_genres: Vec<String>,
    #[serde(default)]
    pub excludes_genres: Vec<String>,
    #[serde(default)]
    pub includes_tags: Vec<String>,
    #[serde(default)]
    pub excludes_tags: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct TmdbSettings {
    #[serde(default, alias = "tmdb-api-key")]
    pub api_key: String,
    /// Pause between TMDB requests.
    #[serde(default = "TmdbSettings::default_cooldown_ms")]
    pub cooldown_ms: u64,
}

impl Default for TmdbSettings {
    fn default() -> Self {
        Self {
            api_key: String::new(),
            cooldown_ms: Self::default_cooldown_ms(),
        }
    }
}

impl TmdbSettings {
    fn default_cooldown_ms() -> u64 {
        250
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct SonarrSettings {
    #[serde(default = "SonarrSettings::default_base_url")]
    pub base_url: String,
    #[serde(default, alias = "sonarr-api-key")]
    pub api_key: String,
    #[serde(default)]
    pub root_folder: String,
    #[serde(default)]
    pub quality_profile: String,
    /// `"NULL"` or empty for Sonarr versions without language profiles.
    #[serde(default)]
    pub language_profile: String,
    #[serde(default)]
    pub monitor: MonitorType,
    #[serde(default = "SonarrSettings::default_season_folder")]
    pub season_folder: bool,
    #[serde(default)]
    pub search: bool,
    #[serde(default)]
    pub unmet_search: bool,
    #[serde(default)]
    pub series_type: SeriesType,
    #[serde(default)]
    pub tags: Vec<String>,
}

impl Default for SonarrSettings {
    fn default() -> Self {
        Self {
            base_url: Self::default_base_url(),
            api_key: String::new(),
            root_folder: String::new(),
            quality_profile: String::new(),
            language_profile: String::new(),
            monitor: MonitorType::default(),
            season_folder: Self::default_season_folder(),
            search: false,
            unmet_search: false,
            series_type: SeriesType::default(),
            tags: Vec::new(),
        }
    }
}

impl SonarrSettings {
    fn default_base_url() -> String {
        "http://localhost:8989".to_string()
    }

    fn default_season_folder() -> bool {
        true
    }

    pub fn language_profile(&self) -> Option<String> {
        let profile = self.language_profile.trim();
        if profile.is_empty() || profile.eq_ignore_ascii_case("NULL") {
            None
        } else {
            Some(profile.to_string())
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub struct ScriptSettings {
    /// Append failed titles to `log_file`.
    #[serde(default = "ScriptSettings::default_true")]
    pub log: bool,
    #[serde(default = "ScriptSettings::default_log_file")]
    pub log_file: PathBuf,
    /// Skip the interactive selection and add everything.
    #[serde(default)]
    pub select_all: bool,
    /// Show romaji titles in the selection list.
    #[serde(default)]
    pub romaji: bool,
    #[serde(default = "ScriptSettings::default_target_countries")]
    pub target_countries: Vec<String>,
    /// TMDB genre every match must carry.
    #[serde(default = "ScriptSettings::default_genre")]
    pub genre: String,
    #[serde(default = "ScriptSettings::default_max_chain_depth")]
    pub max_chain_depth: usize,
}

impl Default for ScriptSettings {
    fn default() -> Self {
        Self {
            log: true,
            log_file: Self::default_log_file(),
            select_all: false,
            romaji: false,
            target_countries: Self::default_target_countries(),
            genre: Self::default_genre(),
            max_chain_depth: Self::default_max_chain_depth(),
        }
    }
}

impl ScriptSettings {
    fn default_true() -> bool {
        true
    }

    fn default_log_file() -> PathBuf {
        PathBuf::from("log_search_errors.txt")
    }

    fn default_target_countries() -> Vec<String> {
        DEFAULT_TARGET_COUNTRIES.iter().map(|c| c.to_string()).collect()
    }

    fn default_genre() -> String {
        "Animation".to_string()
    }

    fn default_max_chain_depth() -> usize {
        DEFAULT_MAX_CHAIN_DEPTH
    }
}

impl Settings {
    pub async fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = tokio::fs::read_to_string(path).await?;
        let settings: Settings = toml::from_str(&content)?;
        tracing::info!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Check the keys a run can't do without.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tmdb.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("tmdb.api-key"));
        }
        if self.sonarr.api_key.trim().is_empty() {
            return Err(ConfigError::Missing("sonarr.api-key"));
        }
        if self.sonarr.root_folder.trim().is_empty() {
            return Err(ConfigError::Missing("sonarr.root-folder"));
        }
        if self.sonarr.quality_profile.trim().is_empty() {
            return Err(ConfigError::Missing("sonarr.quality-profile"));
        }
        Ok(())
    }

    pub fn season_query(&self, year: i32, season: Season) -> SeasonQuery {
        SeasonQuery {
            include_genres: self.anilist.includes_genres.clone(),
            exclude_genres: self.anilist.excludes_genres.clone(),
            include_tags: self.anilist.includes_tags.clone(),
            exclude_tags: self.anilist.excludes_tags.clone(),
            ..SeasonQuery::new(year, season)
        }
    }

    pub fn add_options(&self) -> AddOptions {
        AddOptions {
            root_folder: self.sonarr.root_folder.clone(),
            quality_profile: self.sonarr.quality_profile.clone(),
            language_profile: self.sonarr.language_profile(),
            monitor: self.sonarr.monitor,
            season_folder: self.sonarr.season_folder,
            search: self.sonarr.search,
            unmet_search: self.sonarr.unmet_search,
            series_type: self.sonarr.series_type,
            tags: self.sonarr.tags.clone(),
        }
    }
}
