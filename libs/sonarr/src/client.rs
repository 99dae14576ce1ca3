use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use throttle::RateGovernor;

use crate::error::SonarrError;

const API_PREFIX: &str = "/api/v3";
const API_KEY_HEADER: &str = "X-Api-Key";

pub struct SonarrClient {
    client: Client,
    base_url: String,
    api_key: String,
    governor: RateGovernor,
}

impl SonarrClient {
    /// Create a SonarrClient for the instance at `base_url`.
    pub fn new(client: Client, base_url: impl Into<String>, api_key: impl Into<String>) -> Self {
        Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            api_key: api_key.into(),
            governor: RateGovernor::new("sonarr"),
        }
    }

    pub(crate) fn url(&self, path: &str) -> String {
        format!("{}{}{}", self.base_url, API_PREFIX, path)
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.client
            .get(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.client
            .post(self.url(path))
            .header(API_KEY_HEADER, &self.api_key)
    }

    pub(crate) async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> crate::Result<T> {
        let response = self.governor.execute(request).await?;
        let body = response.text().await?;
        let deserializer = &mut serde_json::Deserializer::from_str(&body);
        serde_path_to_error::deserialize(deserializer).map_err(|e| SonarrError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })
    }
}
