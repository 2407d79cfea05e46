//! # Order Manager Client
//!
//! The only way callers reach the actor. Each method builds a command with a
//! fresh one-shot response channel, queues it (waiting if that queue is full)
//! and waits for the single answer. No deadline is applied here; wrap the call
//! in `tokio::time::timeout` if one is needed.
use crate::framework::command::*;
use crate::model::{
    CancelParams, CreateAndRouteParams, Execution, ModifyParams, OrderId, OrderStatus,
};
use crate::order_actor::OrderError;
use rust_decimal::Decimal;
use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, instrument};

/// Cloneable handle to one order manager actor.
#[derive(Clone)]
pub struct OrderManagerClient {
    create: mpsc::Sender<CreateAndRouteOrder>,
    modify: mpsc::Sender<ModifyOrder>,
    cancel: mpsc::Sender<CancelOrder>,
    set_status: mpsc::Sender<SetOrderStatus>,
    set_error_msg: mpsc::Sender<SetOrderErrorMsg>,
    add_execution: mpsc::Sender<AddExecution>,
    close: mpsc::Sender<()>,
}

impl OrderManagerClient {
    pub(crate) fn new(
        create: mpsc::Sender<CreateAndRouteOrder>,
        modify: mpsc::Sender<ModifyOrder>,
        cancel: mpsc::Sender<CancelOrder>,
        set_status: mpsc::Sender<SetOrderStatus>,
        set_error_msg: mpsc::Sender<SetOrderErrorMsg>,
        add_execution: mpsc::Sender<AddExecution>,
        close: mpsc::Sender<()>,
    ) -> Self {
        Self {
            create,
            modify,
            cancel,
            set_status,
            set_error_msg,
            add_execution,
            close,
        }
    }

    #[instrument(skip_all, fields(listing_id = params.listing_id))]
    pub async fn create_and_route(&self, params: CreateAndRouteParams) -> Result<OrderId, OrderError> {
        debug!(?params, "create_and_route called");
        let order_id = request(&self.create, |respond_to| CreateAndRouteOrder { params, respond_to }).await?;
        info!(%order_id, "Order created");
        Ok(order_id)
    }

    #[instrument(skip_all, fields(order_id = %params.order_id))]
    pub async fn modify(&self, params: ModifyParams) -> Result<(), OrderError> {
        info!(price = %params.price, quantity = %params.quantity, "Modifying order");
        request(&self.modify, |respond_to| ModifyOrder { params, respond_to }).await
    }

    #[instrument(skip_all, fields(order_id = %params.order_id))]
    pub async fn cancel(&self, params: CancelParams) -> Result<(), OrderError> {
        info!("Cancelling order");
        request(&self.cancel, |respond_to| CancelOrder { params, respond_to }).await
    }

    #[instrument(skip_all, fields(order_id = %order_id))]
    pub async fn set_status(&self, order_id: OrderId, status: OrderStatus) -> Result<(), OrderError> {
        info!(%status, "Updating order status");
        request(&self.set_status, |respond_to| SetOrderStatus {
            order_id,
            status,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all, fields(order_id = %order_id))]
    pub async fn set_error_msg(&self, order_id: OrderId, msg: impl Into<String>) -> Result<(), OrderError> {
        let msg = msg.into();
        info!(%msg, "Updating order error message");
        request(&self.set_error_msg, |respond_to| SetOrderErrorMsg {
            order_id,
            msg,
            respond_to,
        })
        .await
    }

    #[instrument(skip_all, fields(order_id = %order_id))]
    pub async fn add_execution(
        &self,
        order_id: OrderId,
        price: Decimal,
        quantity: Decimal,
        exec_id: impl Into<String>,
    ) -> Result<(), OrderError> {
        let execution = Execution {
            id: exec_id.into(),
            price,
            quantity,
        };
        info!(exec_id = %execution.id, %price, %quantity, "Adding execution");
        request(&self.add_execution, |respond_to| AddExecution {
            order_id,
            execution,
            respond_to,
        })
        .await
    }

    /// Asks the actor to stop. Commands still queued are never answered.
    /// Returns immediately if the actor has already stopped.
    pub async fn close(&self) {
        info!("Closing order manager");
        if self.close.send(()).await.is_err() {
            debug!("Order manager already stopped");
        }
    }
}

async fn request<C, T>(
    sender: &mpsc::Sender<C>,
    build: impl FnOnce(Response<T>) -> C,
) -> Result<T, OrderError> {
    let (respond_to, response) = oneshot::channel();
    sender
        .send(build(respond_to))
        .await
        .map_err(|_| OrderError::ActorClosed)?;
    response.await.map_err(|_| OrderError::Unanswered)?
}
