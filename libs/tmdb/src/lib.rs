mod client;
mod error;
mod genre;
pub mod models;
mod search;
mod tv;

pub use client::TmdbClient;
pub use error::TmdbError;
pub use models::{ExternalIds, Genre, GenreList, PaginatedResponse, Presence, TvShow};
pub use search::SearchTvParams;

pub type Result<T> = std::result::Result<T, TmdbError>;
