//! Adapter implementations for the HTTP clients.
//!
//! These bind `anilist`, `tmdb` and `sonarr` to the catalog traits so the
//! pipeline never depends on wire types.

use anilist::{AnilistClient, Media, MediaSeason, RelationType, SeasonFilter};
use async_trait::async_trait;
use sonarr::{AddOptions, SonarrClient};
use tmdb::{Presence, SearchTvParams, TmdbClient, TvShow};

use crate::models::{
    GenreCode, IngestReport, Relation, RelationKind, SearchPage, Season, SeasonQuery,
    SecondaryIdField, SourcePage, TargetShow, TitleRecord, TitleSearch,
};
use crate::traits::{Ingestor, SourceCatalog, TargetCatalog};
use crate::CatalogError;

// ============================================================================
// AniList
// ============================================================================

fn media_season(season: Season) -> MediaSeason {
    match season {
        Season::Winter => MediaSeason::Winter,
        Season::Spring => MediaSeason::Spring,
        Season::Summer => MediaSeason::Summer,
        Season::Fall => MediaSeason::Fall,
    }
}

fn season_filter(query: &SeasonQuery) -> SeasonFilter {
    SeasonFilter {
        year: query.year,
        season: media_season(query.season),
        genre_in: query.include_genres.clone(),
        genre_not_in: query.exclude_genres.clone(),
        tag_in: query.include_tags.clone(),
        tag_not_in: query.exclude_tags.clone(),
    }
}

fn title_record(media: Media) -> TitleRecord {
    TitleRecord::new(
        media.id,
        media.title.english,
        media.title.romaji,
        media.season_year,
    )
}

fn relation_kind(relation_type: RelationType) -> RelationKind {
    match relation_type {
        RelationType::Parent => RelationKind::ParentStory,
        RelationType::Prequel => RelationKind::Prequel,
        _ => RelationKind::Other,
    }
}

#[async_trait]
impl SourceCatalog for AnilistClient {
    async fn season_page(
        &self,
        query: &SeasonQuery,
        page: u32,
    ) -> Result<SourcePage, CatalogError> {
        let response = AnilistClient::season_page(self, &season_filter(query), page).await?;
        Ok(SourcePage {
            entries: response.media.into_iter().map(title_record).collect(),
            has_next_page: response.page_info.has_next_page,
        })
    }

    async fn relations(&self, source_id: i64) -> Result<Vec<Relation>, CatalogError> {
        let edges = AnilistClient::relations(self, source_id).await?;
        Ok(edges
            .into_iter()
            .map(|edge| Relation {
                kind: relation_kind(edge.relation_type),
                record: title_record(edge.node),
            })
            .collect())
    }
}

// ============================================================================
// TMDB
// ============================================================================

fn target_show(show: TvShow) -> TargetShow {
    TargetShow {
        id: show.id,
        name: show.name,
        genre_ids: show.genre_ids,
        origin_country: show.origin_country,
    }
}

#[async_trait]
impl TargetCatalog for TmdbClient {
    async fn genres(&self) -> Result<Vec<GenreCode>, CatalogError> {
        let list = self.movie_genres().await?;
        Ok(list
            .genres
            .into_iter()
            .map(|genre| GenreCode {
                name: genre.name,
                code: genre.id,
            })
            .collect())
    }

    async fn search(&self, search: &TitleSearch, page: i64) -> Result<SearchPage, CatalogError> {
        let params = SearchTvParams::new(search.title.clone())
            .with_year(search.year)
            .with_page(page);
        let response = self.search_tv(&params).await?;
        Ok(SearchPage {
            page: response.page,
            total_pages: response.total_pages,
            results: response.results.into_iter().map(target_show).collect(),
        })
    }

    async fn secondary_id(&self, target_id: i64) -> Result<SecondaryIdField, CatalogError> {
        let ids = self.tv_external_ids(target_id).await?;
        Ok(match ids.tvdb_id {
            Presence::Missing => SecondaryIdField::Missing,
            Presence::Null => SecondaryIdField::Null,
            Presence::Value(id) => SecondaryIdField::Present(id),
        })
    }
}

// ============================================================================
// Sonarr
// ============================================================================

/// Sonarr client paired with the options every added series gets.
pub struct SonarrIngestor {
    client: SonarrClient,
    options: AddOptions,
}

impl SonarrIngestor {
    pub fn new(client: SonarrClient, options: AddOptions) -> Self {
        Self { client, options }
    }
}

#[async_trait]
impl Ingestor for SonarrIngestor {
    async fn existing_ids(&self) -> Result<Vec<i64>, CatalogError> {
        let series = self.client.all_series().await?;
        Ok(series.into_iter().map(|s| s.tvdb_id).collect())
    }

    async fn ingest(&self, secondary_ids: &[i64]) -> Result<IngestReport, CatalogError> {
        let report = self
            .client
            .add_multiple_series(secondary_ids, &self.options)
            .await?;
        Ok(IngestReport {
            added: report.added,
            exists: report.exists,
            not_found: report.not_found,
            excluded: report.excluded,
            failed: report.failed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anilist::MediaTitle;

    #[test]
    fn test_media_maps_english_to_primary() {
        let record = title_record(Media {
            id: 125367,
            title: MediaTitle {
                romaji: Some("Kaguya-sama wa Kokurasetai: Ultra Romantic".into()),
                english: Some("Kaguya-sama: Love is War -Ultra Romantic-".into()),
            },
            season_year: Some(2022),
        });

        assert_eq!(record.source_id, 125367);
        assert_eq!(
            record.primary_title.as_deref(),
            Some("Kaguya-sama: Love is War -Ultra Romantic-")
        );
        assert_eq!(
            record.alternate_title.as_deref(),
            Some("Kaguya-sama wa Kokurasetai: Ultra Romantic")
        );
        assert_eq!(record.release_year, Some(2022));
        assert_eq!(record.target_id(), None);
    }

    #[test]
    fn test_season_filter_copies_lists() {
        let mut query = SeasonQuery::new(2021, Season::Spring);
        query.exclude_genres = vec!["Hentai".into()];
        let filter = season_filter(&query);

        assert_eq!(filter.season, MediaSeason::Spring);
        assert_eq!(filter.year, 2021);
        assert_eq!(filter.genre_not_in, vec!["Hentai".to_string()]);
        assert!(filter.genre_in.is_empty());
    }

    #[test]
    fn test_relation_kinds() {
        assert_eq!(relation_kind(RelationType::Parent), RelationKind::ParentStory);
        assert_eq!(relation_kind(RelationType::Prequel), RelationKind::Prequel);
        assert_eq!(relation_kind(RelationType::Sequel), RelationKind::Other);
        assert_eq!(relation_kind(RelationType::SideStory), RelationKind::Other);
    }
}
