use crate::domain::{EditorError, MigrationContext};
use crate::ports::TxEditor;
use nc_02_transaction_codec::{TransactionComponents, TransactionState};
use shared_types::Party;

/// Replaces the transaction notary with the destination notary of the same
/// name. Source and destination notary keys are unrelated, so the lookup is
/// by name only.
///
/// Output states carry the notary too and are rewritten the same way.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxNotaryEditor;

impl TxNotaryEditor {
    fn destination_notary(
        &self,
        notary: &Party,
        context: &MigrationContext,
    ) -> Result<Party, EditorError> {
        context
            .identity_space()
            .destination_party_from_name(&notary.name)
            .map_err(|err| EditorError::mapping(self.name(), err))
    }
}

impl TxEditor for TxNotaryEditor {
    fn name(&self) -> &str {
        "TxNotaryEditor"
    }

    fn edit(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError> {
        let notary = components
            .notary
            .as_ref()
            .map(|notary| self.destination_notary(notary, context))
            .transpose()?;

        let outputs = components
            .outputs
            .into_iter()
            .map(|output| {
                let notary = match &notary {
                    Some(tx_notary) if tx_notary.name == output.notary.name => tx_notary.clone(),
                    _ => self.destination_notary(&output.notary, context)?,
                };
                Ok(TransactionState { notary, ..output })
            })
            .collect::<Result<Vec<_>, EditorError>>()?;

        Ok(TransactionComponents {
            notary,
            outputs,
            ..components
        })
    }
}
