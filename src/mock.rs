//! # Mock Collaborators
//!
//! In-memory doubles for the store, gateway and listing resolver, for testing
//! the order manager without a database or a venue connection.
//!
//! | Double | Records | Failure injection |
//! |--------|---------|-------------------|
//! | [`MockOrderStore`] | every write, in order | `fail_next_get`, `fail_next_store` |
//! | [`MockGateway`] | every routing call, in order | `fail_next` |
//! | [`MockListingResolver`] | every lookup | `fail_next`, `paused` + `release` |
//!
//! Injected failures are queued and consumed one per call, so a test can make
//! exactly the N-th call fail.
//!
//! ```ignore
//! let store = MockOrderStore::new();
//! let gateway = MockGateway::new();
//! let resolver = MockListingResolver::new([Listing::new(5, "ACME", "XNAS")]);
//! gateway.fail_next(GatewayError::Rejected("closed".into()));
//!
//! let context = OrderContext::new(Arc::new(store.clone()), Arc::new(gateway.clone()), Arc::new(resolver.clone()));
//! // ... drive the order manager ...
//! assert!(gateway.calls().is_empty());
//! ```

use crate::model::{Listing, ListingId, Order, OrderId};
use crate::ports::{
    GatewayError, ListingResolver, ListingResult, MemoryOrderStore, OrderGateway, OrderStore,
    ResolveError, StaticListingResolver, StoreError,
};
use async_trait::async_trait;
use rust_decimal::Decimal;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tokio::sync::{oneshot, watch};
use tokio_util::sync::CancellationToken;

// =============================================================================
// STORE
// =============================================================================

#[derive(Default)]
struct StoreState {
    writes: Vec<Order>,
    get_failures: VecDeque<StoreError>,
    store_failures: VecDeque<StoreError>,
}

/// Order store backed by [`MemoryOrderStore`] that records every write.
#[derive(Clone, Default)]
pub struct MockOrderStore {
    memory: MemoryOrderStore,
    state: Arc<Mutex<StoreState>>,
}

impl MockOrderStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds an order without recording it as a write.
    pub async fn insert(&self, order: Order) {
        self.memory.store(&order).await.unwrap();
    }

    /// Current stored state of an order.
    pub async fn order(&self, id: &OrderId) -> Option<Order> {
        self.memory.get(id).await.unwrap()
    }

    /// Snapshots of every successful write, oldest first.
    pub fn writes(&self) -> Vec<Order> {
        self.state.lock().unwrap().writes.clone()
    }

    /// Ids of every successful write, oldest first.
    pub fn written_ids(&self) -> Vec<OrderId> {
        self.writes().into_iter().map(|o| o.id).collect()
    }

    pub fn fail_next_get(&self, error: StoreError) {
        self.state.lock().unwrap().get_failures.push_back(error);
    }

    pub fn fail_next_store(&self, error: StoreError) {
        self.state.lock().unwrap().store_failures.push_back(error);
    }
}

#[async_trait]
impl OrderStore for MockOrderStore {
    async fn get(&self, id: &OrderId) -> Result<Option<Order>, StoreError> {
        let failure = self.state.lock().unwrap().get_failures.pop_front();
        if let Some(error) = failure {
            return Err(error);
        }
        self.memory.get(id).await
    }

    async fn store(&self, order: &Order) -> Result<(), StoreError> {
        let failure = self.state.lock().unwrap().store_failures.pop_front();
        if let Some(error) = failure {
            return Err(error);
        }
        self.memory.store(order).await?;
        self.state.lock().unwrap().writes.push(order.clone());
        Ok(())
    }
}

// =============================================================================
// GATEWAY
// =============================================================================

/// A routing call seen by [`MockGateway`].
#[derive(Debug, Clone, PartialEq)]
pub enum GatewayCall {
    Send {
        order_id: OrderId,
        listing_id: ListingId,
    },
    Cancel {
        order_id: OrderId,
    },
    Modify {
        order_id: OrderId,
        listing_id: ListingId,
        quantity: Decimal,
        price: Decimal,
    },
}

impl GatewayCall {
    pub fn order_id(&self) -> &OrderId {
        match self {
            Self::Send { order_id, .. } | Self::Cancel { order_id } | Self::Modify { order_id, .. } => {
                order_id
            }
        }
    }
}

#[derive(Default)]
struct GatewayState {
    calls: Vec<GatewayCall>,
    failures: VecDeque<GatewayError>,
}

/// Gateway that records every call. A call consumes the next queued failure,
/// if any, but is recorded either way.
#[derive(Clone, Default)]
pub struct MockGateway {
    state: Arc<Mutex<GatewayState>>,
}

impl MockGateway {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<GatewayCall> {
        self.state.lock().unwrap().calls.clone()
    }

    pub fn fail_next(&self, error: GatewayError) {
        self.state.lock().unwrap().failures.push_back(error);
    }

    fn record(&self, call: GatewayCall) -> Result<(), GatewayError> {
        let mut state = self.state.lock().unwrap();
        state.calls.push(call);
        match state.failures.pop_front() {
            Some(error) => Err(error),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl OrderGateway for MockGateway {
    async fn send(&self, order: &Order, listing: &Listing) -> Result<(), GatewayError> {
        self.record(GatewayCall::Send {
            order_id: order.id.clone(),
            listing_id: listing.id,
        })
    }

    async fn cancel(&self, order: &Order) -> Result<(), GatewayError> {
        self.record(GatewayCall::Cancel {
            order_id: order.id.clone(),
        })
    }

    async fn modify(
        &self,
        order: &Order,
        listing: &Listing,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<(), GatewayError> {
        self.record(GatewayCall::Modify {
            order_id: order.id.clone(),
            listing_id: listing.id,
            quantity,
            price,
        })
    }
}

// =============================================================================
// RESOLVER
// =============================================================================

#[derive(Default)]
struct ResolverState {
    requests: Vec<ListingId>,
    failures: VecDeque<ResolveError>,
}

/// Resolver answering from a fixed table, with optional failures and an
/// optional gate that holds every answer back until released.
#[derive(Clone)]
pub struct MockListingResolver {
    table: StaticListingResolver,
    state: Arc<Mutex<ResolverState>>,
    gate: Arc<watch::Sender<bool>>,
}

impl MockListingResolver {
    pub fn new(listings: impl IntoIterator<Item = Listing>) -> Self {
        let (gate, _) = watch::channel(true);
        Self {
            table: StaticListingResolver::new(listings),
            state: Arc::default(),
            gate: Arc::new(gate),
        }
    }

    /// A resolver that holds every answer until [`MockListingResolver::release`].
    pub fn paused(listings: impl IntoIterator<Item = Listing>) -> Self {
        let resolver = Self::new(listings);
        resolver.gate.send_replace(false);
        resolver
    }

    /// Lets held and future answers through.
    pub fn release(&self) {
        self.gate.send_replace(true);
    }

    /// Listing ids requested so far, oldest first.
    pub fn requests(&self) -> Vec<ListingId> {
        self.state.lock().unwrap().requests.clone()
    }

    pub fn fail_next(&self, error: ResolveError) {
        self.state.lock().unwrap().failures.push_back(error);
    }
}

impl ListingResolver for MockListingResolver {
    fn resolve(
        &self,
        _shutdown: CancellationToken,
        listing_id: ListingId,
        result: oneshot::Sender<ListingResult>,
    ) {
        let answer = {
            let mut state = self.state.lock().unwrap();
            state.requests.push(listing_id);
            match state.failures.pop_front() {
                Some(error) => Err(error),
                None => self.table.lookup(listing_id),
            }
        };
        let mut open = self.gate.subscribe();
        tokio::spawn(async move {
            let _ = open.wait_for(|open| *open).await;
            let _ = result.send(answer);
        });
    }
}
