//! # Order Manager Actor
//!
//! The single serializing worker for one venue. It owns the receiving end of
//! every command queue and is the only place order-mutating handlers run, so
//! no two commands ever touch an order at the same time and no lock is needed.
//!
//! ## Scheduling
//!
//! Each cycle is one `biased` select over, in order:
//!
//! 1. the shutdown token,
//! 2. the close channel,
//! 3. the cancel queue,
//! 4. the five standard queues (modify, create, set status, set error
//!    message, add execution), raced fairly against each other.
//!
//! A cancel that is queued when the actor makes its next decision is therefore
//! dispatched before any queued standard command.
//!
//! ## Stopping
//!
//! The loop exits on shutdown, on a close request, or once every client has
//! been dropped. Queued commands are not drained: they are dropped together
//! with the receivers, so their callers get [`OrderError::Unanswered`].
//!
//! A handler runs to completion once dispatched. Listing resolution happens
//! inside the handler, so a slow resolver holds up every queue, cancels
//! included.

use crate::clients::OrderManagerClient;
use crate::framework::command::*;
use crate::lifecycle::{ConfigError, OrderManagerConfig};
use crate::model::OrderId;
use crate::order_actor::{OrderContext, OrderError};
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

type IdGenerator = Box<dyn Fn() -> Result<OrderId, String> + Send + Sync>;

/// Receivers for the commands that share the lower priority tier.
struct StandardQueues {
    modify: mpsc::Receiver<ModifyOrder>,
    create: mpsc::Receiver<CreateAndRouteOrder>,
    set_status: mpsc::Receiver<SetOrderStatus>,
    set_error_msg: mpsc::Receiver<SetOrderErrorMsg>,
    add_execution: mpsc::Receiver<AddExecution>,
}

impl StandardQueues {
    /// Next command from whichever queue is ready first. Returns `None` once
    /// all five queues are closed and empty.
    async fn recv(&mut self) -> Option<Command> {
        tokio::select! {
            Some(cmd) = self.modify.recv() => Some(Command::Modify(cmd)),
            Some(cmd) = self.create.recv() => Some(Command::CreateAndRoute(cmd)),
            Some(cmd) = self.set_status.recv() => Some(Command::SetStatus(cmd)),
            Some(cmd) = self.set_error_msg.recv() => Some(Command::SetErrorMsg(cmd)),
            Some(cmd) = self.add_execution.recv() => Some(Command::AddExecution(cmd)),
            else => None,
        }
    }
}

/// The command actor. Create with [`OrderManagerActor::new`], then spawn
/// [`OrderManagerActor::run`].
pub struct OrderManagerActor {
    cancels: mpsc::Receiver<CancelOrder>,
    standard: StandardQueues,
    close: mpsc::Receiver<()>,
    next_id_fn: IdGenerator,
    processed: u64,
}

impl OrderManagerActor {
    /// Creates the actor and the client that feeds it.
    ///
    /// Every command kind gets its own bounded queue of
    /// `config.channel_capacity`. A full queue makes callers of that kind wait;
    /// other kinds are unaffected.
    pub fn new(config: &OrderManagerConfig) -> Result<(Self, OrderManagerClient), ConfigError> {
        config.validate()?;
        let capacity = config.channel_capacity;

        let (cancel_tx, cancels) = mpsc::channel(capacity);
        let (modify_tx, modify) = mpsc::channel(capacity);
        let (create_tx, create) = mpsc::channel(capacity);
        let (set_status_tx, set_status) = mpsc::channel(capacity);
        let (set_error_msg_tx, set_error_msg) = mpsc::channel(capacity);
        let (add_execution_tx, add_execution) = mpsc::channel(capacity);
        let (close_tx, close) = mpsc::channel(1);

        let actor = Self {
            cancels,
            standard: StandardQueues {
                modify,
                create,
                set_status,
                set_error_msg,
                add_execution,
            },
            close,
            next_id_fn: Box::new(|| Ok(OrderId::new_v4())),
            processed: 0,
        };
        let client = OrderManagerClient::new(
            create_tx,
            modify_tx,
            cancel_tx,
            set_status_tx,
            set_error_msg_tx,
            add_execution_tx,
            close_tx,
        );
        Ok((actor, client))
    }

    /// Replaces the order id generator (UUID v4 by default).
    pub fn with_id_generator(
        mut self,
        next_id_fn: impl Fn() -> Result<OrderId, String> + Send + Sync + 'static,
    ) -> Self {
        self.next_id_fn = Box::new(next_id_fn);
        self
    }

    /// Runs the scheduling loop until shutdown, close, or until every client
    /// is gone.
    ///
    /// # Context Injection
    /// Store, gateway and resolver arrive here rather than in `new`, so the
    /// actor and its client can be created before the collaborators are wired.
    pub async fn run(mut self, context: OrderContext, shutdown: CancellationToken) {
        info!("Order manager started");

        loop {
            let command = tokio::select! {
                biased;
                () = shutdown.cancelled() => {
                    info!("Shutdown signalled");
                    break;
                }
                request = self.close.recv() => {
                    match request {
                        Some(()) => info!("Close requested"),
                        None => info!("All clients dropped"),
                    }
                    break;
                }
                Some(cmd) = self.cancels.recv() => Command::Cancel(cmd),
                Some(cmd) = self.standard.recv() => cmd,
            };
            self.dispatch(&context, &shutdown, command).await;
        }

        info!(processed = self.processed, "Order manager stopped");
    }

    async fn dispatch(&mut self, ctx: &OrderContext, shutdown: &CancellationToken, command: Command) {
        let operation = command.operation();
        match command.order_id() {
            Some(id) => debug!(%operation, order_id = %id, "Dispatching"),
            None => debug!(%operation, "Dispatching"),
        }
        self.processed += 1;

        match command {
            Command::Cancel(CancelOrder { params, respond_to }) => {
                reply(operation, respond_to, ctx.cancel(params).await);
            }
            Command::CreateAndRoute(CreateAndRouteOrder { params, respond_to }) => {
                let result = match (self.next_id_fn)() {
                    Ok(id) => ctx.create_and_route(id, params, shutdown).await,
                    Err(e) => Err(OrderError::Internal(e)),
                };
                reply(operation, respond_to, result);
            }
            Command::Modify(ModifyOrder { params, respond_to }) => {
                reply(operation, respond_to, ctx.modify(params, shutdown).await);
            }
            Command::SetStatus(SetOrderStatus {
                order_id,
                status,
                respond_to,
            }) => {
                reply(operation, respond_to, ctx.set_status(order_id, status).await);
            }
            Command::SetErrorMsg(SetOrderErrorMsg {
                order_id,
                msg,
                respond_to,
            }) => {
                reply(operation, respond_to, ctx.set_error_msg(order_id, msg).await);
            }
            Command::AddExecution(AddExecution {
                order_id,
                execution,
                respond_to,
            }) => {
                reply(operation, respond_to, ctx.add_execution(order_id, execution).await);
            }
        }
    }
}

fn reply<T>(operation: Operation, respond_to: Response<T>, result: Result<T, OrderError>) {
    match &result {
        Ok(_) => info!(%operation, "Command ok"),
        Err(e) => warn!(%operation, error = %e, "Command failed"),
    }
    if respond_to.send(result).is_err() {
        debug!(%operation, "Caller stopped waiting for result");
    }
}
