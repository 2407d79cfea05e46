//! Collaborators the order manager depends on: persistence, venue gateway and
//! listing reference data.

pub mod gateway;
pub mod resolver;
pub mod store;

pub use gateway::*;
pub use resolver::*;
pub use store::*;
