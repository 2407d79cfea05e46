//! # Commands
//!
//! The six request payloads accepted by the order manager. Each one carries a
//! private [`Response`] channel created fresh by the caller; the actor writes
//! exactly one result to it and drops it.

use crate::model::{CancelParams, CreateAndRouteParams, Execution, ModifyParams, OrderId, OrderStatus};
use crate::order_actor::OrderError;
use std::fmt::Display;
use tokio::sync::oneshot;

/// Type alias for the one-shot response channel of a command.
pub type Response<T> = oneshot::Sender<Result<T, OrderError>>;

/// Which operation a command performs. Carried in errors and logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateAndRoute,
    Modify,
    Cancel,
    SetStatus,
    SetErrorMsg,
    AddExecution,
}

impl Display for Operation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::CreateAndRoute => "create and route order",
            Self::Modify => "modify order",
            Self::Cancel => "cancel order",
            Self::SetStatus => "set order status",
            Self::SetErrorMsg => "set order error message",
            Self::AddExecution => "add execution",
        };
        f.write_str(name)
    }
}

#[derive(Debug)]
pub struct CreateAndRouteOrder {
    pub params: CreateAndRouteParams,
    pub respond_to: Response<OrderId>,
}

#[derive(Debug)]
pub struct ModifyOrder {
    pub params: ModifyParams,
    pub respond_to: Response<()>,
}

#[derive(Debug)]
pub struct CancelOrder {
    pub params: CancelParams,
    pub respond_to: Response<()>,
}

#[derive(Debug)]
pub struct SetOrderStatus {
    pub order_id: OrderId,
    pub status: OrderStatus,
    pub respond_to: Response<()>,
}

#[derive(Debug)]
pub struct SetOrderErrorMsg {
    pub order_id: OrderId,
    pub msg: String,
    pub respond_to: Response<()>,
}

#[derive(Debug)]
pub struct AddExecution {
    pub order_id: OrderId,
    pub execution: Execution,
    pub respond_to: Response<()>,
}

/// A command taken off one of the actor's queues, ready for dispatch.
#[derive(Debug)]
pub enum Command {
    CreateAndRoute(CreateAndRouteOrder),
    Modify(ModifyOrder),
    Cancel(CancelOrder),
    SetStatus(SetOrderStatus),
    SetErrorMsg(SetOrderErrorMsg),
    AddExecution(AddExecution),
}

impl Command {
    pub fn operation(&self) -> Operation {
        match self {
            Self::CreateAndRoute(_) => Operation::CreateAndRoute,
            Self::Modify(_) => Operation::Modify,
            Self::Cancel(_) => Operation::Cancel,
            Self::SetStatus(_) => Operation::SetStatus,
            Self::SetErrorMsg(_) => Operation::SetErrorMsg,
            Self::AddExecution(_) => Operation::AddExecution,
        }
    }

    /// The order the command targets; `None` for a create, whose id is not
    /// assigned yet.
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            Self::CreateAndRoute(_) => None,
            Self::Modify(cmd) => Some(&cmd.params.order_id),
            Self::Cancel(cmd) => Some(&cmd.params.order_id),
            Self::SetStatus(cmd) => Some(&cmd.order_id),
            Self::SetErrorMsg(cmd) => Some(&cmd.order_id),
            Self::AddExecution(cmd) => Some(&cmd.order_id),
        }
    }
}
