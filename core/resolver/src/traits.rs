//! Catalog abstractions.
//!
//! The pipeline only talks to these traits so it can be driven by the real
//! HTTP clients or by in-memory mocks.

use async_trait::async_trait;

use crate::models::{
    GenreCode, IngestReport, Relation, SearchPage, SeasonQuery, SecondaryIdField, SourcePage,
    TitleSearch,
};
use crate::CatalogError;

/// The catalog season listings and relation graphs come from.
#[async_trait]
pub trait SourceCatalog: Send + Sync {
    /// One page (1-based) of the season listing.
    async fn season_page(&self, query: &SeasonQuery, page: u32)
        -> Result<SourcePage, CatalogError>;

    /// Typed relation edges of a work.
    async fn relations(&self, source_id: i64) -> Result<Vec<Relation>, CatalogError>;
}

/// The catalog titles are resolved against.
#[async_trait]
pub trait TargetCatalog: Send + Sync {
    /// Genre vocabulary.
    async fn genres(&self) -> Result<Vec<GenreCode>, CatalogError>;

    /// One page (1-based) of results for a title search.
    async fn search(&self, search: &TitleSearch, page: i64) -> Result<SearchPage, CatalogError>;

    /// Secondary catalog id recorded for a target record.
    async fn secondary_id(&self, target_id: i64) -> Result<SecondaryIdField, CatalogError>;
}

/// The library manager resolved titles are handed to.
#[async_trait]
pub trait Ingestor: Send + Sync {
    /// Secondary ids already in the library.
    async fn existing_ids(&self) -> Result<Vec<i64>, CatalogError>;

    /// Add the given secondary ids.
    async fn ingest(&self, secondary_ids: &[i64]) -> Result<IngestReport, CatalogError>;
}
