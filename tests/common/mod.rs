#![allow(dead_code)]

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use venue_order_manager::clients::OrderManagerClient;
use venue_order_manager::framework::OrderManagerActor;
use venue_order_manager::lifecycle::OrderManagerConfig;
use venue_order_manager::mock::{MockGateway, MockListingResolver, MockOrderStore};
use venue_order_manager::model::{CreateAndRouteParams, Listing, Order, OrderId, OrderStatus, Side};
use venue_order_manager::order_actor::OrderContext;

pub const LISTING_ID: i32 = 5;

pub fn listing() -> Listing {
    Listing::new(LISTING_ID, "ACME", "XNAS")
}

/// BUY 100 @ 10.00 on listing 5.
pub fn buy_params() -> CreateAndRouteParams {
    CreateAndRouteParams {
        side: Side::Buy,
        quantity: dec!(100),
        price: dec!(10.00),
        listing_id: LISTING_ID,
        originator_id: "desk-1".into(),
        originator_ref: "ref-1".into(),
        root_originator_id: "desk-1".into(),
        root_originator_ref: "root-1".into(),
        destination: "XNAS".into(),
    }
}

/// An order already acknowledged by the venue.
pub fn live_order(id: &str, quantity: Decimal) -> Order {
    let mut params = buy_params();
    params.quantity = quantity;
    let mut order = Order::from_create_params(OrderId::from(id), params);
    order.set_status(OrderStatus::Live).unwrap();
    order
}

/// Mocks plus an actor that has been created but not started.
pub struct Harness {
    pub store: MockOrderStore,
    pub gateway: MockGateway,
    pub resolver: MockListingResolver,
    pub shutdown: CancellationToken,
    pub actor: Option<OrderManagerActor>,
    pub client: OrderManagerClient,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_resolver(MockListingResolver::new([listing()]))
    }

    pub fn with_resolver(resolver: MockListingResolver) -> Self {
        let (actor, client) = venue_order_manager::order_actor::new().unwrap();
        Self::assemble(actor, client, resolver)
    }

    /// Harness whose actor uses `config` instead of the defaults.
    pub fn with_config(config: &OrderManagerConfig) -> Self {
        let (actor, client) = OrderManagerActor::new(config).unwrap();
        Self::assemble(actor, client, MockListingResolver::new([listing()]))
    }

    fn assemble(
        actor: OrderManagerActor,
        client: OrderManagerClient,
        resolver: MockListingResolver,
    ) -> Self {
        Self {
            store: MockOrderStore::new(),
            gateway: MockGateway::new(),
            resolver,
            shutdown: CancellationToken::new(),
            actor: Some(actor),
            client,
        }
    }

    pub fn context(&self) -> OrderContext {
        OrderContext::new(
            Arc::new(self.store.clone()),
            Arc::new(self.gateway.clone()),
            Arc::new(self.resolver.clone()),
        )
    }

    /// Spawns the actor. Call once.
    pub fn start(&mut self) -> JoinHandle<()> {
        let actor = self.actor.take().expect("actor already started");
        tokio::spawn(actor.run(self.context(), self.shutdown.clone()))
    }
}
