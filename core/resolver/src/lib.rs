//! Cross-catalog identity resolution for a season of TV anime.
//!
//! The pipeline takes a season listing from the source catalog (AniList),
//! resolves every entry to a target catalog record (TMDB), falls back to the
//! work's predecessor when nothing matches, and finally looks up the
//! identifier the library manager consumes (TVDB).
//!
//! ```text
//! fetch_season ─► Orchestrator::run ─┬─► TitleResolver::resolve ─► lookup_secondary_id
//!                                    │          │ no results
//!                                    │          └─► find_predecessor ─► resolve again
//!                                    └─► RunReport { succeeded, failed } ─► ingest
//! ```
//!
//! Catalogs are reached through the [`SourceCatalog`], [`TargetCatalog`]
//! and [`Ingestor`] traits; `adapters` binds them to the HTTP clients.

mod adapters;
mod error;
mod fallback;
mod genre;
pub mod models;
mod orchestrator;
mod season;
mod secondary;
mod title_resolver;
mod traits;

#[cfg(test)]
mod mocks;

pub use adapters::SonarrIngestor;
pub use error::{CatalogError, ResolveError};
pub use fallback::{find_predecessor, ChainGuard, DEFAULT_MAX_CHAIN_DEPTH};
pub use genre::resolve_genre_code;
pub use models::{
    GenreCode, IngestReport, Relation, RelationKind, Resolution, SearchPage, Season, SeasonQuery,
    SecondaryIdField, SourcePage, TargetShow, TitleRecord, TitleSearch,
};
pub use orchestrator::{ingest, FailedTitle, Orchestrator, RunReport};
pub use season::fetch_season;
pub use secondary::lookup_secondary_id;
pub use title_resolver::{MatchCriteria, Strategy, TitleResolver, DEFAULT_TARGET_COUNTRIES};
pub use traits::{Ingestor, SourceCatalog, TargetCatalog};
