use serde::{Deserialize, Serialize};

/// Venue reference data key for a tradable instrument.
pub type ListingId = i32;

/// Venue-specific instrument data needed to route an order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Listing {
    pub id: ListingId,
    pub symbol: String,
    pub market_mic: String,
}

impl Listing {
    pub fn new(id: ListingId, symbol: impl Into<String>, market_mic: impl Into<String>) -> Self {
        Self {
            id,
            symbol: symbol.into(),
            market_mic: market_mic.into(),
        }
    }
}
