use reqwest::RequestBuilder;

use crate::{
    models::{PaginatedResponse, TvShow},
    TmdbClient,
};

/// Parameters for `/search/tv`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchTvParams {
    pub query: String,
    pub first_air_date_year: Option<i32>,
    pub page: i64,
}

impl SearchTvParams {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            query: query.into(),
            first_air_date_year: None,
            page: 1,
        }
    }

    pub fn with_year(mut self, year: Option<i32>) -> Self {
        self.first_air_date_year = year;
        self
    }

    pub fn with_page(mut self, page: i64) -> Self {
        self.page = page;
        self
    }
}

impl TmdbClient {
    /// Search TV shows by title.
    ///
    /// GET /search/tv
    ///
    /// The query is form-encoded, so spaces are sent as `+`.
    pub async fn search_tv(
        &self,
        params: &SearchTvParams,
    ) -> crate::Result<PaginatedResponse<TvShow>> {
        tracing::debug!(
            query = %params.query,
            year = ?params.first_air_date_year,
            page = params.page,
            "Searching TMDB"
        );
        self.send(self.search_tv_request(params)).await
    }

    pub(crate) fn search_tv_request(&self, params: &SearchTvParams) -> RequestBuilder {
        let mut request = self.get("/search/tv").query(&[
            ("query", params.query.as_str()),
            ("page", params.page.to_string().as_str()),
        ]);
        if let Some(year) = params.first_air_date_year {
            request = request.query(&[("first_air_date_year", year)]);
        }
        request
    }
}
