//! Error types for the order manager.

use crate::framework::Operation;
use crate::model::{ListingId, OrderId, OrderStateError};
use crate::ports::{GatewayError, ResolveError, StoreError};
use thiserror::Error;

/// Errors returned to callers of the order manager.
///
/// Every per-order variant names the order and the operation that was
/// attempted. Nothing is rolled back when a later step fails: a `Resolution`
/// or `Gateway` error from a create means the order was persisted but not
/// routed, and [`OrderError::order_id`] gives the id to reconcile.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum OrderError {
    /// The referenced order is unknown to the store.
    #[error("{operation} failed, no order found for id {id}")]
    NotFound { id: OrderId, operation: Operation },

    /// The order rejected the transition.
    #[error("{operation} rejected for order {id}: {source}")]
    Validation {
        id: OrderId,
        operation: Operation,
        #[source]
        source: OrderStateError,
    },

    /// Reading or writing the order failed.
    #[error("{operation} failed to access store for order {id}: {source}")]
    Store {
        id: OrderId,
        operation: Operation,
        #[source]
        source: StoreError,
    },

    #[error("{operation} failed to resolve listing {listing_id} for order {id}: {source}")]
    Resolution {
        id: OrderId,
        operation: Operation,
        listing_id: ListingId,
        #[source]
        source: ResolveError,
    },

    #[error("{operation} failed at gateway for order {id}: {source}")]
    Gateway {
        id: OrderId,
        operation: Operation,
        #[source]
        source: GatewayError,
    },

    /// A new order id could not be generated.
    #[error("failed to create new order id: {0}")]
    Internal(String),

    /// The order manager is no longer accepting commands.
    #[error("Order manager closed")]
    ActorClosed,

    /// The order manager stopped before answering a queued command.
    #[error("Order manager stopped before answering")]
    Unanswered,
}

impl OrderError {
    pub fn order_id(&self) -> Option<&OrderId> {
        match self {
            Self::NotFound { id, .. }
            | Self::Validation { id, .. }
            | Self::Store { id, .. }
            | Self::Resolution { id, .. }
            | Self::Gateway { id, .. } => Some(id),
            Self::Internal(_) | Self::ActorClosed | Self::Unanswered => None,
        }
    }

    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::NotFound { operation, .. }
            | Self::Validation { operation, .. }
            | Self::Store { operation, .. }
            | Self::Resolution { operation, .. }
            | Self::Gateway { operation, .. } => Some(*operation),
            Self::Internal(_) => Some(Operation::CreateAndRoute),
            Self::ActorClosed | Self::Unanswered => None,
        }
    }
}
