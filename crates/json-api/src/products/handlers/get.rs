//! Get Product Handler

use std::sync::Arc;

use salvo::{
    oapi::{ToSchema, extract::PathParam},
    prelude::*,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use halalchain_app::domain::products::records::ProductRecord;

use crate::{extensions::*, products::errors::into_status_error, state::State};

/// Product Response
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub(crate) struct ProductResponse {
    /// The unique identifier of the product
    pub uuid: Uuid,

    /// Display name
    pub name: String,

    /// Current unit price, as a decimal string
    pub price: String,

    /// Units currently in stock
    pub stock_quantity: u32,

    /// The date and time the product was created
    pub created_at: String,

    /// The date and time the product was last updated
    pub updated_at: String,
}

impl From<ProductRecord> for ProductResponse {
    fn from(product: ProductRecord) -> Self {
        ProductResponse {
            uuid: product.uuid.into(),
            name: product.name,
            price: product.price.to_string(),
            stock_quantity: product.stock_quantity,
            created_at: product.created_at.to_string(),
            updated_at: product.updated_at.to_string(),
        }
    }
}

/// Get Product Handler
///
/// Returns a product with its current stock.
#[endpoint(
    tags("products"),
    summary = "Get Product",
    security(("bearer_auth" = [])),
    responses(
        (status_code = StatusCode::OK, description = "Product found"),
        (status_code = StatusCode::NOT_FOUND, description = "Product not found"),
        (status_code = StatusCode::INTERNAL_SERVER_ERROR, description = "Internal Server Error"),
    ),
)]
pub(crate) async fn handler(
    product: PathParam<Uuid>,
    depot: &mut Depot,
) -> Result<Json<ProductResponse>, StatusError> {
    let state = depot.obtain_or_500::<Arc<State>>()?;

    depot.user_uuid_or_401()?;

    let product = state
        .app
        .products
        .get_product(product.into_inner().into())
        .await
        .map_err(into_status_error)?;

    Ok(Json(product.into()))
}

#[cfg(test)]
mod tests {
    use salvo::test::{ResponseExt, TestClient};
    use testresult::TestResult;

    use halalchain_app::domain::products::{
        MockProductsService, ProductsServiceError, records::ProductUuid,
    };

    use crate::{products::handlers::tests::make_product, test_helpers::products_service};

    use super::*;

    fn make_service(repo: MockProductsService) -> Service {
        products_service(repo, Router::with_path("products/{product}").get(handler))
    }

    #[tokio::test]
    async fn test_get_returns_product_with_string_price() -> TestResult {
        let mut repo = MockProductsService::new();
        let uuid = ProductUuid::new();

        repo.expect_get_product()
            .once()
            .withf(move |u| *u == uuid)
            .return_once(move |_| Ok(make_product(uuid)));

        let response: ProductResponse =
            TestClient::get(format!("http://example.com/products/{uuid}"))
                .send(&make_service(repo))
                .await
                .take_json()
                .await?;

        assert_eq!(response.uuid, uuid.into_uuid());
        assert_eq!(response.price, "4.5");
        assert_eq!(response.stock_quantity, 12);

        Ok(())
    }

    #[tokio::test]
    async fn test_get_missing_product_returns_404() -> TestResult {
        let mut repo = MockProductsService::new();

        repo.expect_get_product()
            .once()
            .return_once(|_| Err(ProductsServiceError::NotFound));

        let res = TestClient::get(format!("http://example.com/products/{}", Uuid::now_v7()))
            .send(&make_service(repo))
            .await;

        assert_eq!(res.status_code, Some(StatusCode::NOT_FOUND));

        Ok(())
    }
}
