use reqwest::Client;
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use throttle::RateGovernor;

use crate::error::AnilistError;

pub const ANILIST_API_URL: &str = "https://graphql.anilist.co";

#[derive(Debug, Serialize)]
struct GraphQlRequest<'a> {
    query: &'a str,
    variables: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    #[serde(default)]
    errors: Vec<GraphQlError>,
}

#[derive(Debug, Deserialize)]
struct GraphQlError {
    message: Option<String>,
}

pub struct AnilistClient {
    client: Client,
    endpoint: String,
    governor: RateGovernor,
}

impl AnilistClient {
    /// Create an AnilistClient with a reqwest Client.
    pub fn new(client: Client) -> Self {
        Self {
            client,
            endpoint: ANILIST_API_URL.to_string(),
            governor: RateGovernor::new("anilist"),
        }
    }

    /// Run a GraphQL query and decode its `data` member.
    pub(crate) async fn query<T: DeserializeOwned>(
        &self,
        query: &str,
        variables: serde_json::Value,
    ) -> crate::Result<T> {
        let request = self
            .client
            .post(&self.endpoint)
            .json(&GraphQlRequest { query, variables });
        let response = self.governor.execute(request).await?;
        let body = response.text().await?;
        decode_data(&body)
    }
}

pub(crate) fn decode_data<T: DeserializeOwned>(body: &str) -> crate::Result<T> {
    let deserializer = &mut serde_json::Deserializer::from_str(body);
    let response: GraphQlResponse<T> =
        serde_path_to_error::deserialize(deserializer).map_err(|e| AnilistError::Json {
            path: e.path().to_string(),
            source: e.into_inner(),
        })?;

    if !response.errors.is_empty() {
        let messages: Vec<String> = response
            .errors
            .into_iter()
            .map(|e| e.message.unwrap_or_else(|| "Unknown error".to_string()))
            .collect();
        return Err(AnilistError::GraphQl(messages.join(", ")));
    }

    response.data.ok_or(AnilistError::MissingData)
}
