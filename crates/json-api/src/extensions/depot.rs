//! Depot helper extensions.

use std::any::Any;

use halalchain_app::domain::users::UserUuid;
use salvo::prelude::{Depot, StatusError};

const USER_UUID_DEPOT_KEY: &str = "user_uuid";

/// Helpers for mapping depot extraction failures to HTTP errors.
pub(crate) trait DepotExt {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError>;

    /// Record the caller resolved by the auth middleware.
    fn insert_user_uuid(&mut self, user: UserUuid);

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError>;
}

impl DepotExt for Depot {
    fn obtain_or_500<T: Any + Send + Sync>(&self) -> Result<&T, StatusError> {
        self.obtain::<T>()
            .map_err(|_ignored| StatusError::internal_server_error())
    }

    fn insert_user_uuid(&mut self, user: UserUuid) {
        self.insert(USER_UUID_DEPOT_KEY, user);
    }

    fn user_uuid_or_401(&self) -> Result<UserUuid, StatusError> {
        self.get::<UserUuid>(USER_UUID_DEPOT_KEY)
            .ok()
            .copied()
            .ok_or_else(StatusError::unauthorized)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_user_is_unauthorized() {
        let depot = Depot::new();

        assert!(depot.user_uuid_or_401().is_err(), "empty depot has no user");
    }

    #[test]
    fn inserted_user_is_returned() {
        let mut depot = Depot::new();
        let user = UserUuid::new();

        depot.insert_user_uuid(user);

        assert_eq!(depot.user_uuid_or_401().ok(), Some(user));
    }
}
