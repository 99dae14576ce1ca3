use reqwest::{Client, RequestBuilder};
use throttle::RateGovernor;

use crate::error::TmdbError;

const BASE_URL: &str = "https://api.themoviedb.org/3";

pub struct TmdbClient {
    client: Client,
    api_key: String,
    base_url: String,
    governor: RateGovernor,
}

impl TmdbClient {
    /// Create a TmdbClient with a reqwest Client.
    pub fn new(client: Client, api_key: impl Into<String>) -> Self {
        Self {
            client,
            api_key: api_key.into(),
            base_url: BASE_URL.to_string(),
            governor: RateGovernor::new("tmdb"),
        }
    }

    /// Replace the default governor, e.g. to add a cooldown between calls.
    pub fn with_governor(mut self, governor: RateGovernor) -> Self {
        self.governor = governor;
        self
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET request against `path` carrying the API key.
    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .query(&[("api_key", self.api_key.as_str())])
    }

    pub(crate) async fn send<T: serde::de::DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> crate::Result<T> {
        let response = self.governor.execute(request).await?;
        let body = response.text().await?;
        decode(&body)
    }
}

pub(crate) fn decode<T: serde::de::DeserializeOwned>(body: &str) -> crate::Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    serde_path_to_error::deserialize(deserializer).map_err(|e| TmdbError::Json {
        path: e.path().to_string(),
        source: e.into_inner(),
    })
}
