//! # Domain Layer
//!
//! Wire model, editable components and the contract-state plug-in seam.
//! No I/O.

pub mod components;
pub mod contract_state;
pub mod errors;
pub mod wire;

pub use components::*;
pub use contract_state::*;
pub use errors::*;
pub use wire::*;
