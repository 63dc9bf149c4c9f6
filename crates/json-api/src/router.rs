//! App Router

use salvo::Router;

use crate::{auth, cart, checkout, orders, products};

/// Every route that needs a signed-in caller.
pub(crate) fn app_router() -> Router {
    Router::new()
        .hoop(auth::middleware::handler)
        .push(
            Router::with_path("products")
                .get(products::index::handler)
                .push(Router::with_path("{product}").get(products::get::handler)),
        )
        .push(
            Router::with_path("cart")
                .get(cart::get::handler)
                .delete(cart::clear::handler)
                .push(
                    Router::with_path("lines")
                        .post(cart::lines::create::handler)
                        .push(
                            Router::with_path("{line}")
                                .put(cart::lines::update::handler)
                                .delete(cart::lines::delete::handler),
                        ),
                ),
        )
        .push(Router::with_path("checkout").post(checkout::create::handler))
        .push(
            Router::with_path("orders")
                .get(orders::index::handler)
                .push(Router::with_path("{order}").get(orders::get::handler)),
        )
}

#[cfg(test)]
mod tests {
    use halalchain_app::domain::auth::MockAuthService;
    use salvo::{affix_state::inject, prelude::*, test::TestClient};
    use testresult::TestResult;

    use crate::test_helpers::state_with_auth;

    use super::*;

    #[tokio::test]
    async fn every_route_requires_a_token() -> TestResult {
        let mut auth = MockAuthService::new();

        auth.expect_authenticate_bearer().never();

        let service = Service::new(
            Router::new()
                .hoop(inject(state_with_auth(auth)))
                .push(app_router()),
        );

        for path in ["products", "cart", "orders"] {
            let res = TestClient::get(format!("http://example.com/{path}"))
                .send(&service)
                .await;

            assert_eq!(
                res.status_code,
                Some(StatusCode::UNAUTHORIZED),
                "GET /{path} should require a token"
            );
        }

        let res = TestClient::post("http://example.com/checkout")
            .send(&service)
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNAUTHORIZED));

        Ok(())
    }
}
