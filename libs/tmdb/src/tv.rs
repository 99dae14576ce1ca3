use crate::{models::ExternalIds, TmdbClient};

impl TmdbClient {
    /// Get the external ids (TVDB, IMDb, ...) of a TV show.
    ///
    /// GET /tv/{series_id}/external_ids
    pub async fn tv_external_ids(&self, series_id: i64) -> crate::Result<ExternalIds> {
        let path = format!("/tv/{}/external_ids", series_id);
        self.send(self.get(&path)).await
    }
}
