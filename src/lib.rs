//! # Venue Order Manager
//!
//! > **One actor per venue, serializing every change to that venue's orders.**
//!
//! Callers never touch order state directly. They go through a cloneable
//! [`OrderManagerClient`](clients::OrderManagerClient), which turns each call
//! into a command on a bounded queue and waits for a single answer. One
//! [`OrderManagerActor`](framework::OrderManagerActor) consumes those queues,
//! runs the matching handler to completion and replies.
//!
//! ## Design
//!
//! ### Cancels First
//! Cancels have their own queue and always win over the other five command
//! kinds (create, modify, set status, set error message, add execution). The
//! five share a lower tier and are picked fairly.
//!
//! ### Late Binding
//! The store, gateway and listing resolver are injected when the actor starts
//! running, via [`OrderContext`](order_actor::OrderContext), not when it is
//! created. Any implementation of the [`ports`] traits can be plugged in.
//!
//! ### Typed Errors
//! Every failure reaches the caller as an
//! [`OrderError`](order_actor::OrderError) carrying the order id and the
//! operation that failed. Handlers stop at the first failing step and do not
//! roll back earlier ones.
//!
//! ### Observability
//! `tracing` throughout: one span per client call and one log line per
//! command outcome. See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! - [`framework`] - commands and the priority scheduling loop
//! - [`order_actor`] - per-command handlers and the error type
//! - [`clients`] - the caller facade
//! - [`model`] - orders, executions, listings and request parameters
//! - [`ports`] - store, gateway and resolver contracts plus simple implementations
//! - [`lifecycle`] - config, start-up, shutdown and tracing setup
//! - [`mock`] - recording doubles for tests
//!
//! ## Running the Demo
//!
//! ```bash
//! RUST_LOG=info cargo run
//! ```

pub mod clients;
pub mod framework;
pub mod lifecycle;
pub mod mock;
pub mod model;
pub mod order_actor;
pub mod ports;
