use serde::{Deserialize, Deserializer, Serialize};

/// TV show entry as returned by `/search/tv`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TvShow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub original_name: String,
    #[serde(default)]
    pub first_air_date: Option<String>,
    #[serde(default)]
    pub genre_ids: Vec<i64>,
    #[serde(default)]
    pub origin_country: Vec<String>,
    #[serde(default)]
    pub original_language: String,
    #[serde(default)]
    pub popularity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaginatedResponse<T> {
    pub page: i64,
    pub results: Vec<T>,
    pub total_pages: i64,
    pub total_results: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Genre {
    pub id: i64,
    pub name: String,
}

/// Response of `/genre/{movie,tv}/list`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenreList {
    pub genres: Vec<Genre>,
}

/// A JSON field that may be absent, explicitly `null`, or set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Presence<T> {
    #[default]
    Missing,
    Null,
    Value(T),
}

impl<'de, T: Deserialize<'de>> Deserialize<'de> for Presence<T> {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Ok(match Option::<T>::deserialize(deserializer)? {
            Some(value) => Presence::Value(value),
            None => Presence::Null,
        })
    }
}

/// Response of `/tv/{series_id}/external_ids`.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalIds {
    pub id: i64,
    #[serde(default)]
    pub tvdb_id: Presence<i64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode;

    #[test]
    fn test_decode_search_page() {
        let body = r#"{
            "page": 1,
            "results": [{
                "id": 119100,
                "name": "BOCCHI THE ROCK!",
                "original_name": "ぼっち・ざ・ろっく！",
                "first_air_date": "2022-10-09",
                "genre_ids": [16, 35],
                "origin_country": ["JP"],
                "original_language": "ja",
                "popularity": 42.5
            }],
            "total_pages": 2,
            "total_results": 21
        }"#;

        let page: PaginatedResponse<TvShow> = decode(body).unwrap();
        assert_eq!(page.results.len(), 1);
        assert_eq!(page.results[0].id, 119100);
        assert_eq!(page.results[0].origin_country, vec!["JP".to_string()]);
        assert_eq!(page.total_pages, 2);
    }

    #[test]
    fn test_sparse_show_uses_defaults() {
        let show: TvShow = decode(r#"{"id": 1, "name": "x"}"#).unwrap();
        assert!(show.origin_country.is_empty());
        assert!(show.genre_ids.is_empty());
        assert_eq!(show.first_air_date, None);
    }

    #[test]
    fn test_external_ids_distinguishes_missing_and_null() {
        let set: ExternalIds = decode(r#"{"id": 65844, "tvdb_id": 303867}"#).unwrap();
        assert_eq!(set.tvdb_id, Presence::Value(303867));

        let null: ExternalIds = decode(r#"{"id": 1, "tvdb_id": null}"#).unwrap();
        assert_eq!(null.tvdb_id, Presence::Null);

        let missing: ExternalIds = decode(r#"{"id": 1}"#).unwrap();
        assert_eq!(missing.tvdb_id, Presence::Missing);
    }

    #[test]
    fn test_decode_error_names_path() {
        let err = decode::<GenreList>(r#"{"genres": [{"id": "x", "name": "Action"}]}"#)
            .unwrap_err();
        match err {
            crate::TmdbError::Json { path, .. } => assert_eq!(path, "genres[0].id"),
            other => panic!("unexpected error: {other}"),
        }
    }
}
