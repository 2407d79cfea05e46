//! Represents an order routed to the venue.
//!
//! # Lifecycle
//! The order owns its own transition rules. Handlers never write `status` or
//! `target_status` directly; they go through [`Order::set_target_status`],
//! [`Order::set_status`], [`Order::amend`] and [`Order::add_execution`], each of which rejects
//! illegal moves with an [`OrderStateError`].
use crate::model::{CreateAndRouteParams, ListingId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use thiserror::Error;

/// Type-safe identifier for Orders.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct OrderId(pub String);

impl OrderId {
    /// A fresh random (v4) identifier.
    pub fn new_v4() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for OrderId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for OrderId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl Display for OrderId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Side {
    Buy,
    Sell,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum OrderStatus {
    /// Not yet acknowledged by the venue, or no pending target.
    #[default]
    None,
    Live,
    Filled,
    Cancelled,
    Rejected,
}

impl OrderStatus {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Filled | Self::Cancelled | Self::Rejected)
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::None => "NONE",
            Self::Live => "LIVE",
            Self::Filled => "FILLED",
            Self::Cancelled => "CANCELLED",
            Self::Rejected => "REJECTED",
        };
        f.write_str(name)
    }
}

/// A fill or partial fill applied against an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Execution {
    pub id: String,
    pub price: Decimal,
    pub quantity: Decimal,
}

/// Illegal order transitions, rejected by the order itself.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderStateError {
    #[error("order is in terminal status {status}, cannot move to {requested}")]
    Terminal {
        status: OrderStatus,
        requested: OrderStatus,
    },

    #[error("{0} cannot be used as a target status")]
    NotTargetable(OrderStatus),

    #[error("cannot target {requested} while cancellation is pending")]
    CancelPending { requested: OrderStatus },

    #[error("{0} cannot be set as an order status")]
    InvalidStatus(OrderStatus),

    #[error("execution {0} has already been applied")]
    DuplicateExecution(String),

    #[error("execution {id} has non-positive quantity {quantity}")]
    NonPositiveQuantity { id: String, quantity: Decimal },

    #[error("execution {id} of {quantity} exceeds remaining quantity {remaining}")]
    Overfill {
        id: String,
        quantity: Decimal,
        remaining: Decimal,
    },

    #[error("quantity {quantity} is below traded quantity {traded}")]
    BelowTraded { quantity: Decimal, traded: Decimal },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub side: Side,
    pub quantity: Decimal,
    pub price: Decimal,
    pub listing_id: ListingId,
    pub originator_id: String,
    pub originator_ref: String,
    pub root_originator_id: String,
    pub root_originator_ref: String,
    pub destination: String,
    pub error_message: Option<String>,
    status: OrderStatus,
    target_status: OrderStatus,
    executions: Vec<Execution>,
}

impl Order {
    /// Builds a new, unrouted order. Status and target status both start at
    /// [`OrderStatus::None`].
    pub fn from_create_params(id: OrderId, params: CreateAndRouteParams) -> Self {
        Self {
            id,
            side: params.side,
            quantity: params.quantity,
            price: params.price,
            listing_id: params.listing_id,
            originator_id: params.originator_id,
            originator_ref: params.originator_ref,
            root_originator_id: params.root_originator_id,
            root_originator_ref: params.root_originator_ref,
            destination: params.destination,
            error_message: None,
            status: OrderStatus::None,
            target_status: OrderStatus::None,
            executions: Vec::new(),
        }
    }

    pub fn status(&self) -> OrderStatus {
        self.status
    }

    pub fn target_status(&self) -> OrderStatus {
        self.target_status
    }

    /// Applied executions, in the order they were accepted.
    pub fn executions(&self) -> &[Execution] {
        &self.executions
    }

    pub fn traded_quantity(&self) -> Decimal {
        self.executions.iter().map(|e| e.quantity).sum()
    }

    pub fn remaining_quantity(&self) -> Decimal {
        self.quantity - self.traded_quantity()
    }

    /// Volume weighted price of all fills, `None` before the first fill.
    pub fn average_price(&self) -> Option<Decimal> {
        let traded = self.traded_quantity();
        if traded.is_zero() {
            return None;
        }
        let notional: Decimal = self.executions.iter().map(|e| e.price * e.quantity).sum();
        Some(notional / traded)
    }

    pub fn set_target_status(&mut self, target: OrderStatus) -> Result<(), OrderStateError> {
        if self.status.is_terminal() {
            return Err(OrderStateError::Terminal {
                status: self.status,
                requested: target,
            });
        }
        match target {
            OrderStatus::Live if self.target_status == OrderStatus::Cancelled => {
                return Err(OrderStateError::CancelPending { requested: target });
            }
            OrderStatus::Live | OrderStatus::Cancelled => {}
            other => return Err(OrderStateError::NotTargetable(other)),
        }
        self.target_status = target;
        Ok(())
    }

    pub fn set_status(&mut self, status: OrderStatus) -> Result<(), OrderStateError> {
        if self.status == status {
            return Ok(());
        }
        if self.status.is_terminal() {
            return Err(OrderStateError::Terminal {
                status: self.status,
                requested: status,
            });
        }
        if status == OrderStatus::None {
            return Err(OrderStateError::InvalidStatus(status));
        }
        self.status = status;
        if self.target_status == status || status.is_terminal() {
            self.target_status = OrderStatus::None;
        }
        Ok(())
    }

    /// Replaces quantity and price. The new quantity may not drop below what
    /// has already traded; amending down to exactly the traded quantity fills
    /// the order.
    pub fn amend(&mut self, quantity: Decimal, price: Decimal) -> Result<(), OrderStateError> {
        if self.status.is_terminal() {
            return Err(OrderStateError::Terminal {
                status: self.status,
                requested: OrderStatus::Live,
            });
        }
        let traded = self.traded_quantity();
        if quantity < traded {
            return Err(OrderStateError::BelowTraded { quantity, traded });
        }

        self.quantity = quantity;
        self.price = price;
        if !traded.is_zero() && self.remaining_quantity().is_zero() {
            self.status = OrderStatus::Filled;
            self.target_status = OrderStatus::None;
        }
        Ok(())
    }

    pub fn add_execution(&mut self, execution: Execution) -> Result<(), OrderStateError> {
        if self.status.is_terminal() {
            return Err(OrderStateError::Terminal {
                status: self.status,
                requested: OrderStatus::Filled,
            });
        }
        if execution.quantity <= Decimal::ZERO {
            return Err(OrderStateError::NonPositiveQuantity {
                id: execution.id,
                quantity: execution.quantity,
            });
        }
        if self.executions.iter().any(|e| e.id == execution.id) {
            return Err(OrderStateError::DuplicateExecution(execution.id));
        }
        let remaining = self.remaining_quantity();
        if execution.quantity > remaining {
            return Err(OrderStateError::Overfill {
                id: execution.id,
                quantity: execution.quantity,
                remaining,
            });
        }

        self.executions.push(execution);
        if self.remaining_quantity().is_zero() {
            self.status = OrderStatus::Filled;
            self.target_status = OrderStatus::None;
        }
        Ok(())
    }
}
