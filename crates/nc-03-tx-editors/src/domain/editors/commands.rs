use crate::domain::{EditorError, MigrationContext};
use crate::ports::TxEditor;
use nc_02_transaction_codec::{Command, TransactionComponents};
use shared_types::PublicKey;
use tracing::trace;

/// Replaces every command signer key with its destination counterpart.
///
/// Owning keys and confidential keys are both resolved. Keys that already
/// belong to a destination identity are kept, so re-running on migrated
/// commands is stable. Any other key is a `MappingNotFound`.
/// Signer order and duplicates are preserved.
#[derive(Debug, Clone, Copy, Default)]
pub struct TxCommandsEditor;

impl TxCommandsEditor {
    fn map_key(&self, key: &PublicKey, context: &MigrationContext) -> Result<PublicKey, EditorError> {
        let space = context.identity_space();
        match space.find_destination_for_source_key(key) {
            Ok(destination) => Ok(destination.owning_key),
            Err(err) if err.is_mapping_not_found() => {
                if space.destination_party_from_anonymous(key).is_ok() {
                    trace!("[nc-03] Signer {} is already a destination key", key);
                    Ok(*key)
                } else {
                    Err(EditorError::mapping(self.name(), err))
                }
            }
            Err(err) => Err(EditorError::mapping(self.name(), err)),
        }
    }
}

impl TxEditor for TxCommandsEditor {
    fn name(&self) -> &str {
        "TxCommandsEditor"
    }

    fn edit(
        &self,
        components: TransactionComponents,
        context: &MigrationContext,
    ) -> Result<TransactionComponents, EditorError> {
        let commands = components
            .commands
            .into_iter()
            .map(|command| {
                let signers = command
                    .signers
                    .iter()
                    .map(|key| self.map_key(key, context))
                    .collect::<Result<Vec<_>, _>>()?;
                Ok(Command {
                    value: command.value,
                    signers,
                })
            })
            .collect::<Result<Vec<_>, EditorError>>()?;

        Ok(TransactionComponents {
            commands,
            ..components
        })
    }
}
