//! Test helpers.

use std::sync::Arc;

use halalchain_app::{
    context::AppContext,
    domain::{
        auth::MockAuthService, carts::MockCartsService, checkout::MockCheckoutService,
        inventory::MockInventoryService, orders::MockOrdersService,
        products::MockProductsService, users::UserUuid,
    },
};
use salvo::{affix_state::inject, prelude::*};
use uuid::Uuid;

use crate::{extensions::*, state::State};

pub(crate) const TEST_USER_UUID: UserUuid =
    UserUuid::from_uuid(Uuid::from_u128(0x0199_0000_0000_7000_8000_0000_0000_0001));

/// One mock per service. A mock without expectations fails the test on any call.
#[derive(Default)]
pub(crate) struct MockServices {
    pub(crate) products: MockProductsService,
    pub(crate) inventory: MockInventoryService,
    pub(crate) carts: MockCartsService,
    pub(crate) checkout: MockCheckoutService,
    pub(crate) orders: MockOrdersService,
    pub(crate) auth: MockAuthService,
}

impl MockServices {
    pub(crate) fn into_state(self) -> Arc<State> {
        State::from_app_context(AppContext {
            products: Arc::new(self.products),
            inventory: Arc::new(self.inventory),
            carts: Arc::new(self.carts),
            checkout: Arc::new(self.checkout),
            orders: Arc::new(self.orders),
            auth: Arc::new(self.auth),
        })
    }
}

#[salvo::handler]
pub(crate) async fn inject_user(
    req: &mut Request,
    depot: &mut Depot,
    res: &mut Response,
    ctrl: &mut FlowCtrl,
) {
    depot.insert_user_uuid(TEST_USER_UUID);
    ctrl.call_next(req, depot, res).await;
}

pub(crate) fn state_with_auth(auth: MockAuthService) -> Arc<State> {
    MockServices {
        auth,
        ..MockServices::default()
    }
    .into_state()
}

fn authenticated_service(services: MockServices, route: Router) -> Service {
    Service::new(
        Router::new()
            .hoop(inject(services.into_state()))
            .hoop(inject_user)
            .push(route),
    )
}

pub(crate) fn products_service(products: MockProductsService, route: Router) -> Service {
    authenticated_service(
        MockServices {
            products,
            ..MockServices::default()
        },
        route,
    )
}

pub(crate) fn carts_service(carts: MockCartsService, route: Router) -> Service {
    authenticated_service(
        MockServices {
            carts,
            ..MockServices::default()
        },
        route,
    )
}

pub(crate) fn checkout_service(checkout: MockCheckoutService, route: Router) -> Service {
    authenticated_service(
        MockServices {
            checkout,
            ..MockServices::default()
        },
        route,
    )
}

pub(crate) fn orders_service(orders: MockOrdersService, route: Router) -> Service {
    authenticated_service(
        MockServices {
            orders,
            ..MockServices::default()
        },
        route,
    )
}
