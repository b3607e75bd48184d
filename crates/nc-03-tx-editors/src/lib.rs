//! # Transaction Editors (nc-03)
//!
//! Rewrites the identity-bearing parts of a decomposed transaction so that it
//! belongs to the destination network.
//!
//! ## Editor Chain
//!
//! ```text
//! TransactionComponents
//!   → TxCommandsEditor               signer keys → destination keys
//!   → TxNotaryEditor                 notary → destination notary (by name)
//!   → TxNetworkParametersHashEditor  hash → context target hash
//!   → cordapp editors...             participants inside state payloads
//!   → TransactionComponents'
//! ```
//!
//! Each editor takes ownership of its input and returns a new value; the
//! [`MigrationContext`] is shared read-only by every stage. The first failing
//! editor aborts the chain and is named in the error.
//!
//! ## Plug-ins
//!
//! Application editors and state schemas come from a [`CordappsRepository`].
//! [`RegistryCordappsRepository`] resolves a plugin directory's
//! `cordapps.json` manifest against a [`CordappRegistry`] of compiled-in
//! cordapps.
//!
//! ## Invariants
//!
//! | Editor | Guarantee |
//! |--------|-----------|
//! | Commands | No mapped source key survives; signer count and order preserved |
//! | Notary | Notary name unchanged, key is the destination key |
//! | Network parameters | Hash equals the context target, unconditionally |
//! | Chain | Re-running with the same context changes nothing further |

pub mod adapters;
pub mod domain;
pub mod ports;

#[cfg(test)]
pub(crate) mod test_utils;

pub use adapters::{CordappRegistry, RegistryCordappsRepository, CORDAPPS_MANIFEST};
pub use domain::{
    CordappError, EditorChain, EditorError, MigrationContext, TxCommandsEditor,
    TxNetworkParametersHashEditor, TxNotaryEditor,
};
pub use ports::{Cordapp, CordappsRepository, TxEditor};
