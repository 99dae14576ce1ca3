use thiserror::Error;

use crate::Season;

/// Failure talking to one of the catalogs.
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("AniList: {0}")]
    Anilist(#[from] anilist::AnilistError),

    #[error("TMDB: {0}")]
    Tmdb(#[from] tmdb::TmdbError),

    #[error("Sonarr: {0}")]
    Sonarr(#[from] sonarr::SonarrError),

    #[error("{0}")]
    Other(String),
}

/// Errors raised by the resolution pipeline.
///
/// Run-level kinds abort the whole run; everything else only fails the
/// title being resolved.
#[derive(Debug, Error)]
pub enum ResolveError {
    #[error("API error: {0}")]
    Api(#[from] CatalogError),

    #[error("No anime in {year} {season} with the configured genres/tags")]
    EmptySeason { year: i32, season: Season },

    #[error("Genre '{0}' not found")]
    GenreNotFound(String),

    #[error("No result with genre id {genre_code} and origin in [{countries}] found for <{record}>")]
    NoQualifyingMatch {
        record: String,
        genre_code: i64,
        countries: String,
    },

    #[error("No parent story or prequel found for <{record}>")]
    NoPredecessor { record: String },

    #[error("Relation chain loops back to anilist id {source_id}")]
    CycleDetected { source_id: i64 },

    #[error("Relation chain longer than {depth} predecessors")]
    ChainTooDeep { depth: usize },

    #[error("No TVDB id field for tmdb id {target_id}")]
    MissingSecondaryId { target_id: i64 },

    #[error("TVDB id is null for tmdb id {target_id}")]
    NullSecondaryId { target_id: i64 },

    #[error("Record with anilist id {source_id} has no target id yet")]
    NotYetResolved { source_id: i64 },
}

impl ResolveError {
    /// Whether this error should end the run instead of failing one title.
    pub fn is_run_level(&self) -> bool {
        matches!(
            self,
            ResolveError::EmptySeason { .. } | ResolveError::GenreNotFound(_)
        )
    }
}
