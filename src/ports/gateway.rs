//! Venue connectivity contract.

use crate::model::{Listing, Order};
use async_trait::async_trait;
use rust_decimal::Decimal;
use thiserror::Error;
use tracing::info;

#[derive(Debug, Clone, Error, PartialEq)]
pub enum GatewayError {
    /// The venue refused the routing action.
    #[error("Rejected by venue: {0}")]
    Rejected(String),
    /// The action could not be delivered.
    #[error("Gateway unavailable: {0}")]
    Unavailable(String),
}

/// Transmits order actions to the venue. Success means the action was
/// accepted for transmission; there is no acknowledgement payload.
#[async_trait]
pub trait OrderGateway: Send + Sync {
    async fn send(&self, order: &Order, listing: &Listing) -> Result<(), GatewayError>;

    async fn cancel(&self, order: &Order) -> Result<(), GatewayError>;

    async fn modify(
        &self,
        order: &Order,
        listing: &Listing,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<(), GatewayError>;
}

/// Gateway for a simulated venue: accepts and logs every action.
#[derive(Debug, Clone, Default)]
pub struct SimulatedGateway;

#[async_trait]
impl OrderGateway for SimulatedGateway {
    async fn send(&self, order: &Order, listing: &Listing) -> Result<(), GatewayError> {
        info!(order_id = %order.id, symbol = %listing.symbol, side = ?order.side,
            quantity = %order.quantity, price = %order.price, "Routed order");
        Ok(())
    }

    async fn cancel(&self, order: &Order) -> Result<(), GatewayError> {
        info!(order_id = %order.id, "Routed cancel");
        Ok(())
    }

    async fn modify(
        &self,
        order: &Order,
        listing: &Listing,
        quantity: Decimal,
        price: Decimal,
    ) -> Result<(), GatewayError> {
        info!(order_id = %order.id, symbol = %listing.symbol, %quantity, %price, "Routed modify");
        Ok(())
    }
}
