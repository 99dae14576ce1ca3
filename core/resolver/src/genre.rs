use crate::traits::TargetCatalog;
use crate::ResolveError;

/// Look up the target catalog's numeric code for a genre name.
///
/// Names are compared exactly; the first matching entry wins.
pub async fn resolve_genre_code<T>(target: &T, name: &str) -> Result<i64, ResolveError>
where
    T: TargetCatalog + ?Sized,
{
    let genres = target.genres().await?;
    genres
        .into_iter()
        .find(|genre| genre.name == name)
        .map(|genre| genre.code)
        .ok_or_else(|| ResolveError::GenreNotFound(name.to_string()))
}
