use serde_json::Value;

use crate::{models::Series, SonarrClient};

impl SonarrClient {
    /// Every series in the library.
    /// GET /api/v3/series
    pub async fn all_series(&self) -> crate::Result<Vec<Series>> {
        self.send(self.get("/series")).await
    }

    /// Look a series up by TVDB id.
    /// GET /api/v3/series/lookup?term=tvdb:{id}
    ///
    /// The lookup record is kept untyped since it is posted back verbatim.
    pub async fn lookup_tvdb(&self, tvdb_id: i64) -> crate::Result<Option<Value>> {
        let term = format!("tvdb:{}", tvdb_id);
        let results: Vec<Value> = self
            .send(self.get("/series/lookup").query(&[("term", term)]))
            .await?;
        Ok(results.into_iter().next())
    }

    /// POST /api/v3/series
    pub(crate) async fn add_series(&self, body: &Value) -> crate::Result<Series> {
        self.send(self.post("/series").json(body)).await
    }
}
