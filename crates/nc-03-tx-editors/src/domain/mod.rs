//! # Domain Layer
//!
//! Migration context, built-in editors and the editor chain.

pub mod context;
pub mod editors;
pub mod errors;

pub use context::MigrationContext;
pub use editors::{EditorChain, TxCommandsEditor, TxNetworkParametersHashEditor, TxNotaryEditor};
pub use errors::{CordappError, EditorError};
