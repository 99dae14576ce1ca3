use crate::models::{SeasonQuery, TitleRecord};
use crate::traits::SourceCatalog;
use crate::ResolveError;

/// Collect every work airing in the queried season, in catalog order.
///
/// Pages are requested from 1 until the catalog reports no next page. A
/// failed page aborts the whole fetch.
pub async fn fetch_season<S>(source: &S, query: &SeasonQuery) -> Result<Vec<TitleRecord>, ResolveError>
where
    S: SourceCatalog + ?Sized,
{
    let mut records = Vec::new();
    let mut page = 1;

    loop {
        let response = source.season_page(query, page).await?;
        tracing::debug!(
            page,
            entries = response.entries.len(),
            has_next_page = response.has_next_page,
            "Fetched season page"
        );
        records.extend(response.entries);
        if !response.has_next_page {
            break;
        }
        page += 1;
    }

    if records.is_empty() {
        return Err(ResolveError::EmptySeason {
            year: query.year,
            season: query.season,
        });
    }

    tracing::info!(
        year = query.year,
        season = %query.season,
        count = records.len(),
        "Fetched season listing"
    );
    Ok(records)
}
