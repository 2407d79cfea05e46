//! Order handling: the per-command handlers, their injected context and the
//! error type callers see.

pub mod error;
pub mod handlers;

pub use error::*;
pub use handlers::OrderContext;

use crate::clients::OrderManagerClient;
use crate::framework::OrderManagerActor;
use crate::lifecycle::{ConfigError, OrderManagerConfig};

/// Creates a new order manager actor and its client with default settings.
pub fn new() -> Result<(OrderManagerActor, OrderManagerClient), ConfigError> {
    OrderManagerActor::new(&OrderManagerConfig::default())
}
