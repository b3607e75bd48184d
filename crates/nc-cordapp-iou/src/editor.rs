use crate::state::IouState;
use nc_02_transaction_codec::TransactionComponents;
use nc_03_tx_editors::{EditorError, MigrationContext, TxEditor};
use shared_types::{AbstractParty, Party};
use std::sync::Arc;
use tracing::trace;

/// Replaces lender and borrower of every IOU output with their destination
/// identities. Other outputs pass through.
#[derive(Debug, Clone, Copy, Default)]
pub struct IouTxEditor;

impl IouTxEditor {
    fn destination(&self, party: &Party, context: &MigrationContext) -> Result<Party, EditorError> {
        context
            .identity_space()
            .find_destination_for_source_party(&AbstractParty::Party(party.clone()))
            .map_err(|err| EditorError::mapping(self.name(), err))
    }
}

impl TxEditor for IouTxEditor {
    fn name(&self) -> &str {
        "IouTxEditor"
    }

    fn edit(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError> {
        let outputs = components
            .outputs
            .into_iter()
            .enumerate()
            .map(|(index, output)| {
                let Some(iou) = output.data.as_any().downcast_ref::<IouState>() else {
                    return Ok(output);
                };
                trace!("[iou] Rewriting participants of output {}", index);
                let migrated = iou.with_parties(
                    self.destination(&iou.lender, context)?,
                    self.destination(&iou.borrower, context)?,
                );
                Ok(output.with_data(Arc::new(migrated)))
            })
            .collect::<Result<Vec<_>, EditorError>>()?;

        Ok(TransactionComponents {
            outputs,
            ..components
        })
    }
}
