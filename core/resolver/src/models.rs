use std::fmt;
use std::str::FromStr;

use crate::ResolveError;

/// Anime season of a calendar year.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Winter,
    Spring,
    Summer,
    Fall,
}

impl Season {
    pub const ALL: [Season; 4] = [Season::Winter, Season::Spring, Season::Summer, Season::Fall];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Winter => "winter",
            Season::Spring => "spring",
            Season::Summer => "summer",
            Season::Fall => "fall",
        }
    }

    /// Capitalized name for display ("Spring").
    pub fn label(&self) -> &'static str {
        match self {
            Season::Winter => "Winter",
            Season::Spring => "Spring",
            Season::Summer => "Summer",
            Season::Fall => "Fall",
        }
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Season {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Season::ALL
            .into_iter()
            .find(|season| season.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown season '{}' (winter, spring, summer, fall)", s))
    }
}

/// A season listing request with optional genre/tag filters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeasonQuery {
    pub year: i32,
    pub season: Season,
    pub include_genres: Vec<String>,
    pub exclude_genres: Vec<String>,
    pub include_tags: Vec<String>,
    pub exclude_tags: Vec<String>,
}

impl SeasonQuery {
    pub fn new(year: i32, season: Season) -> Self {
        Self {
            year,
            season,
            include_genres: Vec::new(),
            exclude_genres: Vec::new(),
            include_tags: Vec::new(),
            exclude_tags: Vec::new(),
        }
    }
}

/// How far a title record got through the pipeline.
///
/// A secondary id can only exist alongside a target id.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Resolution {
    #[default]
    Unresolved,
    Partial { target_id: i64 },
    Resolved { target_id: i64, secondary_id: i64 },
}

/// One work flowing through the resolution pipeline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleRecord {
    /// Source catalog (AniList) id.
    pub source_id: i64,
    /// English title.
    pub primary_title: Option<String>,
    /// Romaji title.
    pub alternate_title: Option<String>,
    /// Year the work first aired, when the source catalog knows it.
    pub release_year: Option<i32>,
    resolution: Resolution,
}

impl TitleRecord {
    pub fn new(
        source_id: i64,
        primary_title: Option<String>,
        alternate_title: Option<String>,
        release_year: Option<i32>,
    ) -> Self {
        Self {
            source_id,
            primary_title,
            alternate_title,
            release_year,
            resolution: Resolution::Unresolved,
        }
    }

    pub fn resolution(&self) -> Resolution {
        self.resolution
    }

    pub fn target_id(&self) -> Option<i64> {
        match self.resolution {
            Resolution::Unresolved => None,
            Resolution::Partial { target_id } | Resolution::Resolved { target_id, .. } => {
                Some(target_id)
            }
        }
    }

    pub fn secondary_id(&self) -> Option<i64> {
        match self.resolution {
            Resolution::Resolved { secondary_id, .. } => Some(secondary_id),
            _ => None,
        }
    }

    pub fn is_resolved(&self) -> bool {
        matches!(self.resolution, Resolution::Resolved { .. })
    }

    /// Copy of this record bound to a target catalog id. Any previous
    /// secondary id is dropped since it belonged to the old target.
    pub fn with_target_id(self, target_id: i64) -> Self {
        Self {
            resolution: Resolution::Partial { target_id },
            ..self
        }
    }

    /// Copy of this record carrying its secondary id.
    pub fn with_secondary_id(self, secondary_id: i64) -> Result<Self, ResolveError> {
        let target_id = self.target_id().ok_or(ResolveError::NotYetResolved {
            source_id: self.source_id,
        })?;
        Ok(Self {
            resolution: Resolution::Resolved {
                target_id,
                secondary_id,
            },
            ..self
        })
    }

    /// Title to show a person, preferring romaji when asked.
    pub fn display_title(&self, prefer_alternate: bool) -> &str {
        let (first, second) = if prefer_alternate {
            (&self.alternate_title, &self.primary_title)
        } else {
            (&self.primary_title, &self.alternate_title)
        };
        first
            .as_deref()
            .or(second.as_deref())
            .unwrap_or("<untitled>")
    }
}

impl fmt::Display for TitleRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} / {} (anilist: {}, year: ",
            self.primary_title.as_deref().unwrap_or("-"),
            self.alternate_title.as_deref().unwrap_or("-"),
            self.source_id,
        )?;
        match self.release_year {
            Some(year) => write!(f, "{}", year)?,
            None => f.write_str("?")?,
        }
        if let Some(target_id) = self.target_id() {
            write!(f, ", tmdb: {}", target_id)?;
        }
        if let Some(secondary_id) = self.secondary_id() {
            write!(f, ", tvdb: {}", secondary_id)?;
        }
        f.write_str(")")
    }
}

/// One page of a season listing.
#[derive(Debug, Clone, Default)]
pub struct SourcePage {
    pub entries: Vec<TitleRecord>,
    pub has_next_page: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    ParentStory,
    Prequel,
    Other,
}

/// Typed edge from a work to a related work in the source catalog.
#[derive(Debug, Clone)]
pub struct Relation {
    pub kind: RelationKind,
    pub record: TitleRecord,
}

/// Human genre name and the target catalog's numeric code for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenreCode {
    pub name: String,
    pub code: i64,
}

/// A title search against the target catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TitleSearch {
    pub title: String,
    pub year: Option<i32>,
}

/// Search candidate from the target catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetShow {
    pub id: i64,
    pub name: String,
    pub genre_ids: Vec<i64>,
    pub origin_country: Vec<String>,
}

/// One page of target catalog search results.
#[derive(Debug, Clone, Default)]
pub struct SearchPage {
    pub page: i64,
    pub total_pages: i64,
    pub results: Vec<TargetShow>,
}

/// State of the secondary-id field in a target catalog record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecondaryIdField {
    Missing,
    Null,
    Present(i64),
}

/// Per-identifier outcome of handing ids to the library manager.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct IngestReport {
    pub added: Vec<i64>,
    pub exists: Vec<i64>,
    pub not_found: Vec<i64>,
    pub excluded: Vec<i64>,
    pub failed: Vec<i64>,
}

impl fmt::Display for IngestReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Added: {}\nExists: {}\nNot Found: {}\nExcluded: {}",
            self.added.len(),
            self.exists.len(),
            self.not_found.len(),
            self.excluded.len()
        )?;
        if !self.failed.is_empty() {
            write!(f, "\nFailed: {}", self.failed.len())?;
        }
        Ok(())
    }
}
