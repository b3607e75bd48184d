//! # Ports Layer
//!
//! - **Driving Port (Inbound)**: [`IdentitySpaceApi`], consumed by editors and the orchestrator
//! - **Driven Port (Outbound)**: [`PartyRepository`], implemented by key-material adapters

pub mod inbound;
pub mod outbound;

pub use inbound::*;
pub use outbound::*;
