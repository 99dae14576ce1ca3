use serde::Deserialize;
use serde_json::json;

use crate::{
    models::{MediaTag, Vocabulary},
    AnilistClient,
};

const VOCABULARY_QUERY: &str = r#"
query {
  genres: GenreCollection
  tags: MediaTagCollection {
    name
    description
    category
    isAdult
  }
}
"#;

#[derive(Debug, Deserialize)]
struct VocabularyData {
    genres: Vec<String>,
    tags: Vec<MediaTag>,
}

impl AnilistClient {
    /// Get every genre and every non-adult tag.
    pub async fn vocabulary(&self) -> crate::Result<Vocabulary> {
        let data: VocabularyData = self.query(VOCABULARY_QUERY, json!({})).await?;
        Ok(into_vocabulary(data))
    }
}

fn into_vocabulary(data: VocabularyData) -> Vocabulary {
    Vocabulary {
        genres: data.genres,
        tags: data.tags.into_iter().filter(|tag| !tag.is_adult).collect(),
    }
}
