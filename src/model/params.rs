//! Request payloads accepted by the order manager.

use crate::model::{ListingId, OrderId, Side};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Payload for creating a new order and routing it to the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAndRouteParams {
    pub side: Side,
    pub quantity: Decimal,
    pub price: Decimal,
    pub listing_id: ListingId,
    pub originator_id: String,
    pub originator_ref: String,
    pub root_originator_id: String,
    pub root_originator_ref: String,
    pub destination: String,
}

/// Payload for amending quantity and price of a live order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModifyParams {
    pub order_id: OrderId,
    pub quantity: Decimal,
    pub price: Decimal,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CancelParams {
    pub order_id: OrderId,
}
