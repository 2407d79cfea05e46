//! Command types and the priority actor that serializes them.
//!
//! # Main Components
//!
//! - [`Command`] and its six payloads, each carrying a one-shot [`Response`]
//! - [`OrderManagerActor`] - the single consumer with cancel-first scheduling

pub mod actor;
pub mod command;

pub use actor::OrderManagerActor;
pub use command::*;
