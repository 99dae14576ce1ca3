use std::collections::HashSet;

use crate::fallback::DEFAULT_MAX_CHAIN_DEPTH;
use crate::models::{IngestReport, TitleRecord};
use crate::secondary::lookup_secondary_id;
use crate::title_resolver::{MatchCriteria, TitleResolver};
use crate::traits::{Ingestor, SourceCatalog, TargetCatalog};
use crate::{CatalogError, ResolveError};

/// A title that could not be resolved, with the reason it failed.
#[derive(Debug, Clone)]
pub struct FailedTitle {
    pub record: TitleRecord,
    pub reason: String,
}

/// Outcome of resolving a batch of titles.
#[derive(Debug, Clone, Default)]
pub struct RunReport {
    /// Fully resolved records, in input order.
    pub succeeded: Vec<TitleRecord>,
    pub failed: Vec<FailedTitle>,
}

impl RunReport {
    /// Secondary ids of every resolved record, in order, each id once.
    ///
    /// Two titles can land on the same series when both fall back to a
    /// shared predecessor.
    pub fn secondary_ids(&self) -> Vec<i64> {
        let mut seen = HashSet::new();
        self.succeeded
            .iter()
            .filter_map(TitleRecord::secondary_id)
            .filter(|id| seen.insert(*id))
            .collect()
    }
}

/// Drives each title through resolution and secondary-id lookup.
pub struct Orchestrator<'a, S: ?Sized, T: ?Sized> {
    source: &'a S,
    target: &'a T,
    criteria: MatchCriteria,
    max_chain_depth: usize,
}

impl<'a, S, T> Orchestrator<'a, S, T>
where
    S: SourceCatalog + ?Sized,
    T: TargetCatalog + ?Sized,
{
    pub fn new(source: &'a S, target: &'a T, genre_code: i64) -> Self {
        Self {
            source,
            target,
            criteria: MatchCriteria::new(genre_code),
            max_chain_depth: DEFAULT_MAX_CHAIN_DEPTH,
        }
    }

    pub fn with_countries<I, C>(mut self, countries: I) -> Self
    where
        I: IntoIterator<Item = C>,
        C: Into<String>,
    {
        self.criteria = self.criteria.with_countries(countries);
        self
    }

    pub fn with_max_chain_depth(mut self, max_chain_depth: usize) -> Self {
        self.max_chain_depth = max_chain_depth;
        self
    }

    /// Resolve every title in input order. A failed title is recorded and
    /// never stops the batch.
    pub async fn run(&self, titles: Vec<TitleRecord>) -> RunReport {
        let resolver = TitleResolver::new(self.source, self.target, self.criteria.clone())
            .with_max_depth(self.max_chain_depth);
        let mut report = RunReport::default();

        for record in titles {
            match self.resolve_one(&resolver, record.clone()).await {
                Ok(resolved) => {
                    tracing::info!(record = %resolved, "Resolved");
                    report.succeeded.push(resolved);
                }
                Err(err) => {
                    tracing::warn!(record = %record, error = %err, "Failed to resolve");
                    report.failed.push(FailedTitle {
                        record,
                        reason: err.to_string(),
                    });
                }
            }
        }

        tracing::info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "Resolution finished"
        );
        report
    }

    async fn resolve_one(
        &self,
        resolver: &TitleResolver<'a, S, T>,
        record: TitleRecord,
    ) -> Result<TitleRecord, ResolveError> {
        let resolved = resolver.resolve(record).await?;
        let target_id = resolved.target_id().ok_or(ResolveError::NotYetResolved {
            source_id: resolved.source_id,
        })?;
        let secondary_id = lookup_secondary_id(self.target, target_id).await?;
        resolved.with_secondary_id(secondary_id)
    }
}

/// Hand resolved secondary ids to the library manager.
pub async fn ingest<I>(ingestor: &I, secondary_ids: &[i64]) -> Result<IngestReport, CatalogError>
where
    I: Ingestor + ?Sized,
{
    let report = ingestor.ingest(secondary_ids).await?;
    tracing::info!(
        added = report.added.len(),
        exists = report.exists.len(),
        not_found = report.not_found.len(),
        excluded = report.excluded.len(),
        failed = report.failed.len(),
        "Ingestion finished"
    );
    Ok(report)
}
