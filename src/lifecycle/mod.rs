//! Runtime orchestration: configuration, start-up and shutdown of the order
//! manager, and tracing setup.
//!
//! # Main Components
//!
//! - [`OrderManagerSystem`] - spawns the actor with its collaborators and shuts it down
//! - [`OrderManagerConfig`] - queue sizing, from defaults or the environment
//! - [`setup_tracing`] - initializes the tracing/logging infrastructure

pub mod config;
pub mod order_system;
pub mod tracing;

pub use config::*;
pub use order_system::*;
pub use self::tracing::*;
