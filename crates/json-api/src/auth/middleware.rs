//! Bearer token middleware.
//!
//! Resolves `Authorization: Bearer <token>` to a [`UserUuid`] and stores it in
//! the depot for the handlers behind it.

use std::sync::Arc;

use halalchain_app::domain::{auth::AuthServiceError, users::UserUuid};
use salvo::{http::header::AUTHORIZATION, prelude::*};
use tracing::{debug, error};

use crate::{extensions::*, state::State};

#[salvo::handler]
pub(crate) async fn handler(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    match authenticate(req, depot).await {
        Ok(user) => {
            depot.insert_user_uuid(user);

            ctrl.call_next(req, depot, res).await;
        }
        Err(status) => {
            res.render(status);

            ctrl.skip_rest();
        }
    }
}

async fn authenticate(req: &Request, depot: &Depot) -> Result<UserUuid, StatusError> {
    let token = bearer_token(req).ok_or_else(|| {
        StatusError::unauthorized().brief("Missing or invalid Authorization header")
    })?;

    let state = depot.obtain_or_500::<Arc<State>>()?;

    state
        .app
        .auth
        .authenticate_bearer(token)
        .await
        .map_err(|error| rejection(&error))
}

fn rejection(error: &AuthServiceError) -> StatusError {
    match error {
        AuthServiceError::NotFound | AuthServiceError::Unauthorized(_) => {
            debug!(%error, "api token rejected");

            StatusError::unauthorized().brief("Invalid API token")
        }
        AuthServiceError::Sql(_) | AuthServiceError::Token(_) => {
            error!(%error, source = ?std::error::Error::source(error), "api token lookup failed");

            StatusError::internal_server_error()
        }
    }
}

fn bearer_token(req: &Request) -> Option<&str> {
    let value = req.headers().get(AUTHORIZATION)?.to_str().ok()?;
    let (scheme, token) = value.split_once(' ')?;
    let token = token.trim();

    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
