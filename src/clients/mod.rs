//! Caller-facing handle to the order manager.

pub mod order_client;

pub use order_client::*;
