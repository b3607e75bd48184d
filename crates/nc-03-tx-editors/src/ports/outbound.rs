//! # Outbound Ports
//!
//! Extension points filled by cordapps.

use crate::domain::{EditorError, MigrationContext};
use nc_02_transaction_codec::{SchemaRegistry, StateSchema, TransactionComponents};
use std::sync::Arc;

/// A pure transformation of transaction components.
///
/// Editors must pass through anything they do not recognise unchanged.
pub trait TxEditor: Send + Sync {
    fn name(&self) -> &str;

    fn edit(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError>;
}

/// An application bundle: the state schemas it owns and the editors that
/// know how to rewrite them.
pub trait Cordapp: Send + Sync {
    /// Short name used in plugin manifests, e.g. `iou`.
    fn name(&self) -> &str;

    fn schemas(&self) -> Vec<Arc<dyn StateSchema>>;

    fn tx_editors(&self) -> Vec<Arc<dyn TxEditor>>;
}

/// Ordered editors and schemas for one snapshot's plugin set.
pub trait CordappsRepository: Send + Sync {
    fn tx_editors(&self) -> Vec<Arc<dyn TxEditor>>;

    fn schemas(&self) -> SchemaRegistry;
}
