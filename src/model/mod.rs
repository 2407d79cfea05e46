//! Order, execution and listing data plus the request DTOs.

pub mod listing;
pub mod order;
pub mod params;

pub use listing::*;
pub use order::*;
pub use params::*;
