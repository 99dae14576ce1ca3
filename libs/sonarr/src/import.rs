use std::collections::HashSet;

use serde_json::{json, Value};

use crate::{
    models::{MonitorType, Series, SeriesType},
    SonarrClient,
};

/// How newly added series are configured.
#[derive(Debug, Clone)]
pub struct AddOptions {
    /// Root folder path, must exist in Sonarr.
    pub root_folder: String,
    /// Quality profile name or id.
    pub quality_profile: String,
    /// Language profile name or id (Sonarr v3 only).
    pub language_profile: Option<String>,
    pub monitor: MonitorType,
    pub season_folder: bool,
    /// Search for missing episodes right after adding.
    pub search: bool,
    /// Search for cutoff-unmet episodes right after adding.
    pub unmet_search: bool,
    pub series_type: SeriesType,
    /// Tag labels; unknown labels are created.
    pub tags: Vec<String>,
}

/// Outcome of [`SonarrClient::add_multiple_series`], by TVDB id.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddReport {
    pub added: Vec<i64>,
    pub exists: Vec<i64>,
    pub not_found: Vec<i64>,
    pub excluded: Vec<i64>,
    /// Lookup or add requests that errored; the rest of the batch still ran.
    pub failed: Vec<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Precheck {
    Exists,
    Excluded,
    Candidate,
}

fn precheck(tvdb_id: i64, existing: &HashSet<i64>, excluded: &HashSet<i64>) -> Precheck {
    if existing.contains(&tvdb_id) {
        Precheck::Exists
    } else if excluded.contains(&tvdb_id) {
        Precheck::Excluded
    } else {
        Precheck::Candidate
    }
}

/// Resolved ids the add payload needs.
#[derive(Debug, Clone)]
struct Placement {
    root_folder: String,
    quality_profile_id: i64,
    language_profile_id: Option<i64>,
    tag_ids: Vec<i64>,
}

fn add_body(mut lookup: Value, placement: &Placement, options: &AddOptions) -> Value {
    if let Some(series) = lookup.as_object_mut() {
        series.insert("rootFolderPath".into(), json!(placement.root_folder));
        series.insert(
            "qualityProfileId".into(),
            json!(placement.quality_profile_id),
        );
        if let Some(id) = placement.language_profile_id {
            series.insert("languageProfileId".into(), json!(id));
        }
        series.insert(
            "monitored".into(),
            json!(options.monitor != MonitorType::None),
        );
        series.insert("seasonFolder".into(), json!(options.season_folder));
        series.insert("seriesType".into(), json!(options.series_type));
        series.insert("tags".into(), json!(placement.tag_ids));
        series.insert(
            "addOptions".into(),
            json!({
                "monitor": options.monitor,
                "searchForMissingEpisodes": options.search,
                "searchForCutoffUnmetEpisodes": options.unmet_search,
            }),
        );
    }
    lookup
}

impl SonarrClient {
    /// Add every TVDB id to the library.
    ///
    /// Ids already in the library or on the import-list exclusion list are
    /// skipped; ids Sonarr's lookup can't find are reported as not found.
    /// A repeated id counts as existing once its first occurrence is added.
    /// Only the placement and library listing requests abort the batch.
    pub async fn add_multiple_series(
        &self,
        tvdb_ids: &[i64],
        options: &AddOptions,
    ) -> crate::Result<AddReport> {
        let placement = Placement {
            root_folder: self.resolve_root_folder(&options.root_folder).await?,
            quality_profile_id: self.resolve_quality_profile(&options.quality_profile).await?,
            language_profile_id: match &options.language_profile {
                Some(name) => Some(self.resolve_language_profile(name).await?),
                None => None,
            },
            tag_ids: self.ensure_tags(&options.tags).await?,
        };

        let mut existing: HashSet<i64> = self
            .all_series()
            .await?
            .into_iter()
            .map(|series| series.tvdb_id)
            .collect();
        let excluded: HashSet<i64> = self
            .import_list_exclusions()
            .await?
            .into_iter()
            .map(|exclusion| exclusion.tvdb_id)
            .collect();

        let mut report = AddReport::default();
        for &tvdb_id in tvdb_ids {
            match precheck(tvdb_id, &existing, &excluded) {
                Precheck::Exists => {
                    report.exists.push(tvdb_id);
                    continue;
                }
                Precheck::Excluded => {
                    report.excluded.push(tvdb_id);
                    continue;
                }
                Precheck::Candidate => {}
            }

            match self.add_one(tvdb_id, &placement, options).await {
                Ok(Some(series)) => {
                    tracing::info!(tvdb_id, title = %series.title, "Added series to Sonarr");
                    existing.insert(tvdb_id);
                    report.added.push(tvdb_id);
                }
                Ok(None) => {
                    tracing::warn!(tvdb_id, "Series not found by Sonarr lookup");
                    report.not_found.push(tvdb_id);
                }
                Err(e) => {
                    tracing::warn!(tvdb_id, error = %e, "Failed to add series to Sonarr");
                    report.failed.push(tvdb_id);
                }
            }
        }

        Ok(report)
    }

    async fn add_one(
        &self,
        tvdb_id: i64,
        placement: &Placement,
        options: &AddOptions,
    ) -> crate::Result<Option<Series>> {
        let Some(lookup) = self.lookup_tvdb(tvdb_id).await? else {
            return Ok(None);
        };
        let series = self.add_series(&add_body(lookup, placement, options)).await?;
        Ok(Some(series))
    }
}
