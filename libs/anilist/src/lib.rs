//! Client for the AniList GraphQL API.
//!
//! Only the handful of queries the season importer needs: one page of a
//! season listing, the relation edges of a work, and the genre/tag
//! vocabulary.

mod client;
mod error;
pub mod models;
mod relations;
mod season;
mod vocabulary;

pub use client::{AnilistClient, ANILIST_API_URL};
pub use error::AnilistError;
pub use models::{
    Media, MediaPage, MediaSeason, MediaTag, MediaTitle, PageInfo, RelationEdge, RelationType,
    SeasonFilter, Vocabulary,
};
pub use season::PAGE_SIZE;

pub type Result<T> = std::result::Result<T, AnilistError>;
