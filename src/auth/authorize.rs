use crate::error::AppError;
use crate::models::User;

/// Checks that the acting account owns the target resource.
///
/// Allowed iff the actor's id equals the resource's recorded owner id;
/// otherwise `Forbidden`. Used before mutating account records, where the
/// target id is caller-supplied and public. Todo ownership is not checked
/// here: todo queries are scoped to the owner at the data layer, so an
/// unowned todo is indistinguishable from an absent one.
pub fn require_ownership(actor: &User, resource_owner_id: i32) -> Result<(), AppError> {
    if actor.id != resource_owner_id {
        return Err(AppError::Forbidden("Not enough permissions.".into()));
    }

    Ok(())
}
