use crate::domain::{EditorError, MigrationContext};
use crate::ports::TxEditor;
use nc_02_transaction_codec::TransactionComponents;

/// Sets the network-parameters hash to the context's target hash,
/// whatever the input hash was.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxNetworkParametersHashEditor;

impl TxEditor for TxNetworkParametersHashEditor {
    fn name(&self) -> &str {
        "TxNetworkParametersHashEditor"
    }

    fn edit(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError> {
        Ok(TransactionComponents {
            network_parameters_hash: Some(context.target_network_parameters_hash()),
            ..components
        })
    }
}
