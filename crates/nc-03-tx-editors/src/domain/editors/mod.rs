//! Built-in editors and the chain that composes them with cordapp editors.

mod chain;
mod commands;
mod network_parameters;
mod notary;

pub use chain::EditorChain;
pub use commands::TxCommandsEditor;
pub use network_parameters::TxNetworkParametersHashEditor;
pub use notary::TxNotaryEditor;
