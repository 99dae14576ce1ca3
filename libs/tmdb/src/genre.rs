use crate::{models::GenreList, TmdbClient};

impl TmdbClient {
    /// Get the movie genre vocabulary.
    ///
    /// GET /genre/movie/list
    pub async fn movie_genres(&self) -> crate::Result<GenreList> {
        self.send(self.get("/genre/movie/list")).await
    }
}
