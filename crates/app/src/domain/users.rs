//! Users
//!
//! Users are owned by the authentication collaborator; the commerce core only
//! ever sees the identifier it hands over.

use thiserror::Error;

use crate::uuids::TypedUuid;

/// Marker for identities issued by the authentication collaborator.
#[derive(Debug)]
pub struct User;

/// User UUID
pub type UserUuid = TypedUuid<User>;

/// Raised when a call arrives without a usable caller identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("a signed-in user is required")]
pub struct Unauthorized;

/// Reject the nil identifier before any store is touched.
///
/// # Errors
///
/// Returns [`Unauthorized`] when `user` is the nil UUID.
pub fn authenticated(user: UserUuid) -> Result<UserUuid, Unauthorized> {
    if user.is_nil() {
        return Err(Unauthorized);
    }

    Ok(user)
}
