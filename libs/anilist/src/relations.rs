use serde::Deserialize;
use serde_json::json;

use crate::{models::RelationEdge, AnilistClient};

const RELATIONS_QUERY: &str = r#"
query ($id: Int) {
  Media(id: $id, type: ANIME) {
    relations {
      edges {
        relationType
        node {
          id
          title { romaji english }
          seasonYear
        }
      }
    }
  }
}
"#;

#[derive(Debug, Deserialize)]
struct RelationsData {
    #[serde(rename = "Media")]
    media: RelationsMedia,
}

#[derive(Debug, Deserialize)]
struct RelationsMedia {
    relations: Relations,
}

#[derive(Debug, Deserialize)]
struct Relations {
    edges: Vec<RelationEdge>,
}

impl AnilistClient {
    /// Get the relation edges (prequel, parent story, ...) of an anime.
    pub async fn relations(&self, media_id: i64) -> crate::Result<Vec<RelationEdge>> {
        tracing::debug!(media_id, "Fetching AniList relations");
        let data: RelationsData = self.query(RELATIONS_QUERY, json!({ "id": media_id })).await?;
        Ok(data.media.relations.edges)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::client::decode_data;
    use crate::models::RelationType;

    #[test]
    fn test_decode_relation_edges() {
        let body = r#"{"data": {"Media": {"relations": {"edges": [
            {"relationType": "PREQUEL", "node": {"id": 112641, "title": {"romaji": "Kaguya-sama wa Kokurasetai?: Tensaitachi no Renai Zunousen", "english": "Kaguya-sama: Love is War?"}, "seasonYear": 2020}},
            {"relationType": "CHARACTER", "node": {"id": 1, "title": {"romaji": "x", "english": null}, "seasonYear": null}},
            {"relationType": "SIDE_STORY", "node": {"id": 2, "title": {"romaji": "y", "english": null}, "seasonYear": 2021}}
        ]}}}}"#;

        let data: RelationsData = decode_data(body).unwrap();
        let edges = data.media.relations.edges;
        assert_eq!(edges.len(), 3);
        assert_eq!(edges[0].relation_type, RelationType::Prequel);
        assert_eq!(edges[0].node.id, 112641);
        assert_eq!(edges[1].relation_type, RelationType::Other);
        assert_eq!(edges[1].node.season_year, None);
        assert_eq!(edges[2].relation_type, RelationType::SideStory);
    }
}
