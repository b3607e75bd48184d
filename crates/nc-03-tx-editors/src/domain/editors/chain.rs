use super::{TxCommandsEditor, TxNetworkParametersHashEditor, TxNotaryEditor};
use crate::domain::{EditorError, MigrationContext};
use crate::ports::TxEditor;
use nc_02_transaction_codec::TransactionComponents;
use std::fmt;
use std::sync::Arc;
use tracing::trace;

/// Ordered list of editors applied one after another.
#[derive(Clone)]
pub struct EditorChain {
    editors: Vec<Arc<dyn TxEditor>>,
}

impl EditorChain {
    /// Built-in editors in their fixed order.
    pub fn builtin_editors() -> Vec<Arc<dyn TxEditor>> {
        vec![
            Arc::new(TxCommandsEditor),
            Arc::new(TxNotaryEditor),
            Arc::new(TxNetworkParametersHashEditor),
        ]
    }

    /// Built-ins first, then the given cordapp editors in order.
    pub fn new(plugin_editors: Vec<Arc<dyn TxEditor>>) -> Self {
        let mut editors = Self::builtin_editors();
        editors.extend(plugin_editors);
        Self { editors }
    }

    /// Exactly the given editors, nothing implicit.
    pub fn from_editors(editors: Vec<Arc<dyn TxEditor>>) -> Self {
        Self { editors }
    }

    pub fn len(&self) -> usize {
        self.editors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editors.is_empty()
    }

    pub fn editor_names(&self) -> Vec<&str> {
        self.editors.iter().map(|editor| editor.name()).collect()
    }

    /// Run every editor; the first failure aborts the chain.
    pub fn apply(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError> {
        self.editors
            .iter()
            .try_fold(components, |components, editor| {
                trace!("[nc-03] Applying {}", editor.name());
                editor.edit(components, context)
            })
    }

    /// Check that edited outputs belong to the destination network: no
    /// participant is a source identity, and every output that lists
    /// participants lists at least one destination identity.
    pub fn verify_participants(
        components: &TransactionComponents,
        context: &MigrationContext,
    ) -> Result<(), EditorError> {
        let space = context.identity_space();
        for (index, output) in components.outputs.iter().enumerate() {
            let participants = output.data.participants();
            if participants.is_empty() {
                continue;
            }

            if let Some(stale) = participants
                .iter()
                .find(|p| space.source_party_from_anonymous(&p.owning_key()).is_ok())
            {
                return Err(EditorError::malformed(
                    "EditorChain",
                    format!("output {} still lists source participant {}", index, stale),
                ));
            }

            let has_destination = participants
                .iter()
                .any(|p| space.destination_party_from_anonymous(&p.owning_key()).is_ok());
            if !has_destination {
                return Err(EditorError::malformed(
                    "EditorChain",
                    format!("output {} has no destination participant", index),
                ));
            }
        }
        Ok(())
    }
}

impl TxEditor for EditorChain {
    fn name(&self) -> &str {
        "EditorChain"
    }

    fn edit(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError> {
        self.apply(components, context)
    }
}

impl fmt::Debug for EditorChain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.editor_names()).finish()
    }
}
