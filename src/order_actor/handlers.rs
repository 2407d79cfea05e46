//! Per-command handlers.
//!
//! Each handler reads the order, applies the change through the order's own
//! transition methods, persists it and forwards the routing action. The first
//! failing step ends the handler; earlier steps are not rolled back.

use crate::framework::Operation;
use crate::model::{
    CancelParams, CreateAndRouteParams, Execution, Listing, ListingId, ModifyParams, Order,
    OrderId, OrderStatus,
};
use crate::order_actor::OrderError;
use crate::ports::{ListingResolver, OrderGateway, OrderStore, ResolveError};
use std::sync::Arc;
use tokio::sync::oneshot;
use tokio_util::sync::CancellationToken;
use tracing::debug;

/// Dependencies injected into the order actor when it starts running.
#[derive(Clone)]
pub struct OrderContext {
    pub store: Arc<dyn OrderStore>,
    pub gateway: Arc<dyn OrderGateway>,
    pub resolver: Arc<dyn ListingResolver>,
}

impl OrderContext {
    pub fn new(
        store: Arc<dyn OrderStore>,
        gateway: Arc<dyn OrderGateway>,
        resolver: Arc<dyn ListingResolver>,
    ) -> Self {
        Self {
            store,
            gateway,
            resolver,
        }
    }

    pub(crate) async fn create_and_route(
        &self,
        id: OrderId,
        params: CreateAndRouteParams,
        shutdown: &CancellationToken,
    ) -> Result<OrderId, OrderError> {
        let op = Operation::CreateAndRoute;
        let mut order = Order::from_create_params(id, params);
        order
            .set_target_status(OrderStatus::Live)
            .map_err(|source| validation(&order.id, op, source))?;

        self.persist(&order, op).await?;
        let listing = self.resolve_listing(&order.id, order.listing_id, op, shutdown).await?;

        self.gateway
            .send(&order, &listing)
            .await
            .map_err(|source| OrderError::Gateway {
                id: order.id.clone(),
                operation: op,
                source,
            })?;
        Ok(order.id)
    }

    pub(crate) async fn modify(
        &self,
        params: ModifyParams,
        shutdown: &CancellationToken,
    ) -> Result<(), OrderError> {
        let op = Operation::Modify;
        let mut order = self.load(&params.order_id, op).await?;
        order
            .set_target_status(OrderStatus::Live)
            .map_err(|source| validation(&order.id, op, source))?;
        order
            .amend(params.quantity, params.price)
            .map_err(|source| validation(&order.id, op, source))?;

        self.persist(&order, op).await?;
        let listing = self.resolve_listing(&order.id, order.listing_id, op, shutdown).await?;

        self.gateway
            .modify(&order, &listing, params.quantity, params.price)
            .await
            .map_err(|source| OrderError::Gateway {
                id: order.id.clone(),
                operation: op,
                source,
            })
    }

    pub(crate) async fn cancel(&self, params: CancelParams) -> Result<(), OrderError> {
        let op = Operation::Cancel;
        let mut order = self.load(&params.order_id, op).await?;
        order
            .set_target_status(OrderStatus::Cancelled)
            .map_err(|source| validation(&order.id, op, source))?;

        self.persist(&order, op).await?;

        self.gateway
            .cancel(&order)
            .await
            .map_err(|source| OrderError::Gateway {
                id: order.id.clone(),
                operation: op,
                source,
            })
    }

    pub(crate) async fn set_status(
        &self,
        order_id: OrderId,
        status: OrderStatus,
    ) -> Result<(), OrderError> {
        let op = Operation::SetStatus;
        let mut order = self.load(&order_id, op).await?;
        order
            .set_status(status)
            .map_err(|source| validation(&order.id, op, source))?;
        self.persist(&order, op).await
    }

    pub(crate) async fn set_error_msg(&self, order_id: OrderId, msg: String) -> Result<(), OrderError> {
        let op = Operation::SetErrorMsg;
        let mut order = self.load(&order_id, op).await?;
        order.error_message = Some(msg);
        self.persist(&order, op).await
    }

    pub(crate) async fn add_execution(
        &self,
        order_id: OrderId,
        execution: Execution,
    ) -> Result<(), OrderError> {
        let op = Operation::AddExecution;
        let mut order = self.load(&order_id, op).await?;
        order
            .add_execution(execution)
            .map_err(|source| validation(&order.id, op, source))?;
        debug!(order_id = %order.id, traded = %order.traded_quantity(), status = %order.status(), "Execution applied");
        self.persist(&order, op).await
    }

    async fn load(&self, id: &OrderId, operation: Operation) -> Result<Order, OrderError> {
        match self.store.get(id).await {
            Ok(Some(order)) => Ok(order),
            Ok(None) => Err(OrderError::NotFound {
                id: id.clone(),
                operation,
            }),
            Err(source) => Err(OrderError::Store {
                id: id.clone(),
                operation,
                source,
            }),
        }
    }

    async fn persist(&self, order: &Order, operation: Operation) -> Result<(), OrderError> {
        self.store
            .store(order)
            .await
            .map_err(|source| OrderError::Store {
                id: order.id.clone(),
                operation,
                source,
            })
    }

    /// Waits for the resolver's answer. The whole actor waits with it.
    async fn resolve_listing(
        &self,
        id: &OrderId,
        listing_id: ListingId,
        operation: Operation,
        shutdown: &CancellationToken,
    ) -> Result<Listing, OrderError> {
        let (tx, rx) = oneshot::channel();
        self.resolver.resolve(shutdown.clone(), listing_id, tx);
        let result = rx.await.unwrap_or_else(|_| {
            Err(ResolveError::Unavailable(
                "resolver dropped the result channel".into(),
            ))
        });
        result.map_err(|source| OrderError::Resolution {
            id: id.clone(),
            operation,
            listing_id,
            source,
        })
    }
}

fn validation(
    id: &OrderId,
    operation: Operation,
    source: crate::model::OrderStateError,
) -> OrderError {
    OrderError::Validation {
        id: id.clone(),
        operation,
        source,
    }
}
