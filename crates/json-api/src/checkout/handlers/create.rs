//! Checkout Handler

use std::sync::Arc;

use salvo::{http::header::LOCATION, prelude::*};

use crate::{
    checkout::errors::into_status_error, extensions::*, orders::OrderResponse, state::State,
};

/// Checkout Handler
///
/// Turns the caller's cart into an order in one step: stock is re-checked and
/// decremented, the order is recorded at current prices, and the cart is
/// emptied. On any failure nothing changes and the cart is kept.
#[endpoint(
    tags("checkout"),
    summary = "Checkout",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::CREATED, description = "Order placed"),
        (status_code = StatusCode::NOT_FOUND, description = "A product in the cart no longer exists"),
        (status_code = StatusCode::CONFLICT, description = "Insufficient stock"),
        (status_code = StatusCode::UNPROCESSABLE_ENTITY, description = "Cart is empty"),
        (status_code = StatusCode::SERVICE_UNAVAILABLE, description = "Checkout could not complete, retry"),
    ),
)]
#[tracing::instrument(
    name = "checkout.create",
    skip(depot, res),
    fields(
        user_uuid = tracing::field::Empty,
        order_uuid = tracing::field::Empty
    ),
    err
)]
pub(crate) async fn handler(
    depot: &mut Depot,
    res: &mut Response,
) -> Result<Json<OrderResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;
    let user = depot.user_uuid_or_401()?;

    let span = tracing::Span::current();

    span.record("user_uuid", tracing::field::display(user));

    let order = state
        .app
        .checkout
        .checkout(user)
        .await
        .map_err(into_status_error)?;

    span.record("order_uuid", tracing::field::display(order.uuid));

    res.add_header(LOCATION, format!("/orders/{}", order.uuid), true)
        .or_500("failed to set location header")?
        .status_code(StatusCode::CREATED);

    Ok(Json(order.into()))
}

#[cfg(test)]
mod tests {
    use halalchain_app::domain::{
        checkout::{CheckoutFailure, CheckoutServiceError, MockCheckoutService},
        orders::records::OrderUuid,
    };
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use crate::{
        orders::tests::make_order,
        test_helpers::{TEST_USER_UUID, checkout_service},
    };

    use super::*;

    fn make_service(repo: MockCheckoutService) -> Service {
        checkout_service(repo, Router::with_path("checkout").post(handler))
    }

    #[tokio::test]
    async fn test_checkout_returns_201_with_location() -> TestResult {
        let mut repo = MockCheckoutService::new();
        let uuid = OrderUuid::new();

        repo.expect_checkout()
            .once()
            .withf(|user| *user == TEST_USER_UUID)
            .return_once(move |_| Ok(make_order(uuid)));

        let mut res = TestClient::post("http://example.com/checkout")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::CREATED));

        let location = res
            .headers()
            .get(LOCATION)
            .and_then(|value| value.to_str().ok())
            .map(ToString::to_string);

        assert_eq!(location, Some(format!("/orders/{uuid}")));

        let body: OrderResponse = res.take_json().await?;

        assert_eq!(body.uuid, uuid.into_uuid());

        Ok(())
    }

    #[tokio::test]
    async fn test_empty_cart_returns_422() -> TestResult {
        let mut repo = MockCheckoutService::new();

        repo.expect_checkout()
            .once()
            .return_once(|_| Err(CheckoutServiceError::EmptyCart));

        let res = TestClient::post("http://example.com/checkout")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::UNPROCESSABLE_ENTITY));

        Ok(())
    }

    #[tokio::test]
    async fn test_timed_out_checkout_returns_503() -> TestResult {
        let mut repo = MockCheckoutService::new();

        repo.expect_checkout()
            .once()
            .return_once(|_| Err(CheckoutServiceError::Failed(CheckoutFailure::TimedOut)));

        let res = TestClient::post("http://example.com/checkout")
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::SERVICE_UNAVAILABLE));

        Ok(())
    }
}
