//! Cross-catalog title resolution.
//!
//! A record is searched in the target catalog with up to four strategies,
//! strongest first. The first strategy with any results decides the outcome:
//! its pages are scanned in order and the first candidate passing the genre
//! and country filters wins. Weaker strategies are never tried once one has
//! returned results.
//!
//! When no strategy returns anything, the work's predecessor is resolved
//! instead, repeating until a match is found or the chain runs out.

use std::collections::HashSet;

use crate::fallback::{find_predecessor, ChainGuard, DEFAULT_MAX_CHAIN_DEPTH};
use crate::models::{SearchPage, TargetShow, TitleRecord, TitleSearch};
use crate::traits::{SourceCatalog, TargetCatalog};
use crate::ResolveError;

/// Origin countries accepted by default.
pub const DEFAULT_TARGET_COUNTRIES: [&str; 5] = ["JP", "CN", "KR", "TW", "HK"];

/// A search strategy, in the order they are attempted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Strategy {
    PrimaryWithYear,
    AlternateWithYear,
    Primary,
    Alternate,
}

impl Strategy {
    pub const ORDER: [Strategy; 4] = [
        Strategy::PrimaryWithYear,
        Strategy::AlternateWithYear,
        Strategy::Primary,
        Strategy::Alternate,
    ];

    /// The search this strategy issues for `record`, or `None` when the
    /// record lacks the title (or year) it needs.
    pub fn search_for(&self, record: &TitleRecord) -> Option<TitleSearch> {
        let (title, with_year) = match self {
            Strategy::PrimaryWithYear => (&record.primary_title, true),
            Strategy::AlternateWithYear => (&record.alternate_title, true),
            Strategy::Primary => (&record.primary_title, false),
            Strategy::Alternate => (&record.alternate_title, false),
        };
        let title = title.as_deref().map(str::trim).filter(|t| !t.is_empty())?;
        let year = if with_year {
            Some(record.release_year?)
        } else {
            None
        };
        Some(TitleSearch {
            title: title.to_string(),
            year,
        })
    }
}

/// Filters a candidate must pass to be accepted.
#[derive(Debug, Clone)]
pub struct MatchCriteria {
    pub genre_code: i64,
    pub countries: HashSet<String>,
}

impl MatchCriteria {
    pub fn new(genre_code: i64) -> Self {
        Self {
            genre_code,
            countries: DEFAULT_TARGET_COUNTRIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn with_countries<I, C>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.countries = countries.into_iter().map(Into::into).collect();
        self
    }

    /// Genre code present and first origin country in the accepted set.
    /// A candidate with no origin country never matches.
    pub fn accepts(&self, show: &TargetShow) -> bool {
        show.genre_ids.contains(&self.genre_code)
            && show
                .origin_country
                .first()
                .is_some_and(|country| self.countries.contains(country))
    }

    fn countries_label(&self) -> String {
        let mut countries: Vec<&str> = self.countries.iter().map(String::as_str).collect();
        countries.sort_unstable();
        countries.join(", ")
    }
}

/// Resolves title records against the target catalog, walking the source
/// catalog's relation graph when a title has no search results.
pub struct TitleResolver<'a, S: ?Sized, T: ?Sized> {
    source: &'a S,
    target: &'a T,
    criteria: MatchCriteria,
    max_depth: usize,
}

impl<'a, S, T> TitleResolver<'a, S, T>
where
    S: SourceCatalog + ?Sized,
    T: TargetCatalog + ?Sized,
{
    pub fn new(source: &'a S, target: &'a T, criteria: MatchCriteria) -> Self {
        Self {
            source,
            target,
            criteria,
            max_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// Resolve `record` to a target catalog id.
    ///
    /// The returned record is the one that actually matched: `record`
    /// itself, or the predecessor it was replaced by.
    pub async fn resolve(&self, record: TitleRecord) -> Result<TitleRecord, ResolveError> {
        let mut guard = ChainGuard::new(self.max_depth);
        let mut current = record;

        loop {
            guard.enter(current.source_id)?;
            if let Some(target_id) = self.resolve_direct(&current).await? {
                tracing::debug!(record = %current, target_id, "Resolved title");
                return Ok(current.with_target_id(target_id));
            }

            tracing::info!(record = %current, "No search results, trying predecessor");
            current = find_predecessor(self.source, &current).await?;
        }
    }

    /// `Ok(None)` when every strategy came back empty.
    async fn resolve_direct(&self, record: &TitleRecord) -> Result<Option<i64>, ResolveError> {
        for strategy in Strategy::ORDER {
            let Some(search) = strategy.search_for(record) else {
                continue;
            };

            let first = self.target.search(&search, 1).await?;
            if first.results.is_empty() {
                continue;
            }

            tracing::debug!(
                ?strategy,
                title = %search.title,
                total_pages = first.total_pages,
                "Search strategy returned results"
            );
            return self.scan(record, &search, first).await.map(Some);
        }
        Ok(None)
    }

    /// Walk every result page of one search for the first accepted candidate.
    async fn scan(
        &self,
        record: &TitleRecord,
        search: &TitleSearch,
        first: SearchPage,
    ) -> Result<i64, ResolveError> {
        let mut page_number = 1;
        let mut page = first;

        loop {
            if let Some(show) = page.results.iter().find(|show| self.criteria.accepts(show)) {
                return Ok(show.id);
            }
            if page_number >= page.total_pages {
                break;
            }
            page_number += 1;
            page = self.target.search(search, page_number).await?;
        }

        Err(ResolveError::NoQualifyingMatch {
            record: record.to_string(),
            genre_code: self.criteria.genre_code,
            countries: self.criteria.countries_label(),
        })
    }
}
