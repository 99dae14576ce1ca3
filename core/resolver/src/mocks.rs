//! In-memory catalogs for testing the pipeline.
//!
//! Every mock records the calls it receives so tests can assert on request
//! order as well as on results.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use crate::models::{
    GenreCode, IngestReport, Relation, SearchPage, SeasonQuery, SecondaryIdField, SourcePage,
    TargetShow, TitleSearch,
};
use crate::traits::{Ingestor, SourceCatalog, TargetCatalog};
use crate::CatalogError;

/// Build a search candidate.
pub fn show(id: i64, genre_ids: &[i64], countries: &[&str]) -> TargetShow {
    TargetShow {
        id,
        name: format!("show {id}"),
        genre_ids: genre_ids.to_vec(),
        origin_country: countries.iter().map(|c| c.to_string()).collect(),
    }
}

pub fn search(title: &str, year: Option<i32>) -> TitleSearch {
    TitleSearch {
        title: title.to_string(),
        year,
    }
}

// ============================================================================
// Mock Source Catalog
// ============================================================================

#[derive(Clone, Default)]
pub struct MockSource {
    pages: Arc<Mutex<Vec<SourcePage>>>,
    relations: Arc<Mutex<HashMap<i64, Vec<Relation>>>>,
    failing_page: Arc<Mutex<Option<u32>>>,
    page_calls: Arc<Mutex<Vec<(SeasonQuery, u32)>>>,
    relation_calls: Arc<Mutex<Vec<i64>>>,
}

impl MockSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a page to the season listing.
    pub fn push_page(&self, page: SourcePage) {
        self.pages.lock().unwrap().push(page);
    }

    pub fn set_relations(&self, source_id: i64, relations: Vec<Relation>) {
        self.relations.lock().unwrap().insert(source_id, relations);
    }

    /// Make the given page number fail with a network error.
    pub fn fail_page(&self, page: u32) {
        *self.failing_page.lock().unwrap() = Some(page);
    }

    pub fn page_calls(&self) -> Vec<(SeasonQuery, u32)> {
        self.page_calls.lock().unwrap().clone()
    }

    pub fn relation_calls(&self) -> Vec<i64> {
        self.relation_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl SourceCatalog for MockSource {
    async fn season_page(
        &self,
        query: &SeasonQuery,
        page: u32,
    ) -> Result<SourcePage, CatalogError> {
        self.page_calls.lock().unwrap().push((query.clone(), page));
        if *self.failing_page.lock().unwrap() == Some(page) {
            return Err(CatalogError::Other(format!("page {page} unavailable")));
        }
        let pages = self.pages.lock().unwrap();
        Ok(pages
            .get(page as usize - 1)
            .cloned()
            .unwrap_or_default())
    }

    async fn relations(&self, source_id: i64) -> Result<Vec<Relation>, CatalogError> {
        self.relation_calls.lock().unwrap().push(source_id);
        Ok(self
            .relations
            .lock()
            .unwrap()
            .get(&source_id)
            .cloned()
            .unwrap_or_default())
    }
}

// ============================================================================
// Mock Target Catalog
// ============================================================================

#[derive(Clone, Default)]
pub struct MockTarget {
    genres: Arc<Mutex<Vec<GenreCode>>>,
    results: Arc<Mutex<HashMap<TitleSearch, Vec<Vec<TargetShow>>>>>,
    secondary: Arc<Mutex<HashMap<i64, SecondaryIdField>>>,
    failing_titles: Arc<Mutex<HashSet<String>>>,
    search_calls: Arc<Mutex<Vec<(TitleSearch, i64)>>>,
    secondary_calls: Arc<Mutex<Vec<i64>>>,
}

impl MockTarget {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_genres(&self, genres: &[(&str, i64)]) {
        *self.genres.lock().unwrap() = genres
            .iter()
            .map(|(name, code)| GenreCode {
                name: name.to_string(),
                code: *code,
            })
            .collect();
    }

    /// Result pages returned for `search`, in page order.
    pub fn set_results(&self, search: TitleSearch, pages: Vec<Vec<TargetShow>>) {
        self.results.lock().unwrap().insert(search, pages);
    }

    pub fn set_secondary(&self, target_id: i64, field: SecondaryIdField) {
        self.secondary.lock().unwrap().insert(target_id, field);
    }

    /// Searches for this title fail with a network error.
    pub fn fail_title(&self, title: &str) {
        self.failing_titles.lock().unwrap().insert(title.to_string());
    }

    pub fn search_calls(&self) -> Vec<(TitleSearch, i64)> {
        self.search_calls.lock().unwrap().clone()
    }

    pub fn secondary_calls(&self) -> Vec<i64> {
        self.secondary_calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl TargetCatalog for MockTarget {
    async fn genres(&self) -> Result<Vec<GenreCode>, CatalogError> {
        Ok(self.genres.lock().unwrap().clone())
    }

    async fn search(&self, search: &TitleSearch, page: i64) -> Result<SearchPage, CatalogError> {
        self.search_calls.lock().unwrap().push((search.clone(), page));
        if self.failing_titles.lock().unwrap().contains(&search.title) {
            return Err(CatalogError::Other(format!("search for {} failed", search.title)));
        }
        let results = self.results.lock().unwrap();
        let pages = results.get(search).cloned().unwrap_or_default();
        Ok(SearchPage {
            page,
            total_pages: pages.len() as i64,
            results: pages.get(page as usize - 1).cloned().unwrap_or_default(),
        })
    }

    async fn secondary_id(&self, target_id: i64) -> Result<SecondaryIdField, CatalogError> {
        self.secondary_calls.lock().unwrap().push(target_id);
        Ok(self
            .secondary
            .lock()
            .unwrap()
            .get(&target_id)
            .copied()
            .unwrap_or(SecondaryIdField::Missing))
    }
}

// ============================================================================
// Mock Ingestor
// ============================================================================

/// Ids already in the library come back as `exists`, ids in `excluded` as
/// `excluded`, everything else is added.
#[derive(Clone, Default)]
pub struct MockIngestor {
    existing: Arc<Mutex<Vec<i64>>>,
    excluded: Arc<Mutex<Vec<i64>>>,
    ingested: Arc<Mutex<Vec<Vec<i64>>>>,
}

impl MockIngestor {
    pub fn new(existing: Vec<i64>, excluded: Vec<i64>) -> Self {
        Self {
            existing: Arc::new(Mutex::new(existing)),
            excluded: Arc::new(Mutex::new(excluded)),
            ingested: Arc::default(),
        }
    }

    pub fn ingested(&self) -> Vec<Vec<i64>> {
        self.ingested.lock().unwrap().clone()
    }
}

#[async_trait]
impl Ingestor for MockIngestor {
    async fn existing_ids(&self) -> Result<Vec<i64>, CatalogError> {
        Ok(self.existing.lock().unwrap().clone())
    }

    async fn ingest(&self, secondary_ids: &[i64]) -> Result<IngestReport, CatalogError> {
        self.ingested.lock().unwrap().push(secondary_ids.to_vec());
        let existing = self.existing.lock().unwrap();
        let excluded = self.excluded.lock().unwrap();
        let mut report = IngestReport::default();
        for &id in secondary_ids {
            if existing.contains(&id) {
                report.exists.push(id);
            } else if excluded.contains(&id) {
                report.excluded.push(id);
            } else {
                report.added.push(id);
            }
        }
        Ok(report)
    }
}
