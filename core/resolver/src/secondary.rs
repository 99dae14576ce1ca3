use crate::models::SecondaryIdField;
use crate::traits::TargetCatalog;
use crate::ResolveError;

/// Fetch the secondary catalog (TVDB) id recorded for a target record.
///
/// An absent field and a null field are reported as different errors.
pub async fn lookup_secondary_id<T>(target: &T, target_id: i64) -> Result<i64, ResolveError>
where
    T: TargetCatalog + ?Sized,
{
    match target.secondary_id(target_id).await? {
        SecondaryIdField::Present(id) => Ok(id),
        SecondaryIdField::Missing => Err(ResolveError::MissingSecondaryId { target_id }),
        SecondaryIdField::Null => Err(ResolveError::NullSecondaryId { target_id }),
    }
}
