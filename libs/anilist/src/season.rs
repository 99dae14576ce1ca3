use serde::Deserialize;
use serde_json::{json, Map, Value};

use crate::{
    models::{MediaPage, SeasonFilter},
    AnilistClient,
};

/// Entries per season page.
pub const PAGE_SIZE: u32 = 30;

#[derive(Debug, Deserialize)]
struct PageData {
    #[serde(rename = "Page")]
    page: MediaPage,
}

impl AnilistClient {
    /// Fetch one page of TV anime airing in `filter.year`/`filter.season`.
    pub async fn season_page(&self, filter: &SeasonFilter, page: u32) -> crate::Result<MediaPage> {
        let (query, variables) = season_query(filter, page);
        tracing::debug!(year = filter.year, season = ?filter.season, page, "Fetching AniList season page");
        let data: PageData = self.query(&query, variables).await?;
        let info = &data.page.page_info;
        tracing::debug!(
            current_page = ?info.current_page,
            last_page = ?info.last_page,
            entries = data.page.media.len(),
            "Fetched AniList season page"
        );
        Ok(data.page)
    }
}

/// Build the season listing query.
///
/// Optional filters only appear, both as variable declarations and as
/// `media` arguments, when their list is non-empty.
pub(crate) fn season_query(filter: &SeasonFilter, page: u32) -> (String, Value) {
    let mut declarations = vec![
        "$page: Int".to_string(),
        "$season: MediaSeason".to_string(),
        "$seasonYear: Int".to_string(),
    ];
    let mut arguments = vec![
        "season: $season".to_string(),
        "seasonYear: $seasonYear".to_string(),
        "type: ANIME".to_string(),
        "format: TV".to_string(),
    ];
    let mut variables = Map::new();
    variables.insert("page".into(), json!(page));
    variables.insert("season".into(), json!(filter.season));
    variables.insert("seasonYear".into(), json!(filter.year));

    let optional = [
        ("genre_in", &filter.genre_in),
        ("genre_not_in", &filter.genre_not_in),
        ("tag_in", &filter.tag_in),
        ("tag_not_in", &filter.tag_not_in),
    ];
    for (name, values) in optional {
        if values.is_empty() {
            continue;
        }
        declarations.push(format!("${name}: [String]"));
        arguments.push(format!("{name}: ${name}"));
        variables.insert(name.into(), json!(values));
    }

    let query = format!(
        r#"query ({declarations}) {{
  Page(page: $page, perPage: {PAGE_SIZE}) {{
    pageInfo {{ hasNextPage currentPage lastPage }}
    media({arguments}) {{
      id
      title {{ romaji english }}
      seasonYear
    }}
  }}
}}"#,
        declarations = declarations.join(", "),
        arguments = arguments.join(", "),
    );

    (query, Value::Object(variables))
}
