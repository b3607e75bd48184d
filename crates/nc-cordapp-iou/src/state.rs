use nc_02_transaction_codec::{CodecError, CommandData, ContractState, StateSchema};
use serde::{Deserialize, Serialize};
use shared_types::{AbstractParty, Party, SecureHash};
use std::any::Any;
use std::sync::Arc;

pub const IOU_STATE_CLASS: &str = "com.example.iou.IouState";
pub const IOU_CONTRACT_CLASS: &str = "com.example.iou.IouContract";
pub const IOU_COMMAND_CLASS: &str = "com.example.iou.IouContract$Commands";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IouState {
    pub lender: Party,
    pub borrower: Party,
    pub amount: u64,
    pub currency: String,
    pub linear_id: SecureHash,
}

impl IouState {
    /// Same IOU between different parties.
    pub fn with_parties(&self, lender: Party, borrower: Party) -> Self {
        Self {
            lender,
            borrower,
            ..self.clone()
        }
    }
}

impl ContractState for IouState {
    fn class_name(&self) -> &str {
        IOU_STATE_CLASS
    }

    fn participants(&self) -> Vec<AbstractParty> {
        vec![self.lender.clone().into(), self.borrower.clone().into()]
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        bincode::serialize(self).map_err(|e| CodecError::encode(IOU_STATE_CLASS, e))
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct IouSchema;

impl StateSchema for IouSchema {
    fn class_name(&self) -> &str {
        IOU_STATE_CLASS
    }

    fn decode(&self, payload: &[u8]) -> Result<Arc<dyn ContractState>, CodecError> {
        let state: IouState =
            bincode::deserialize(payload).map_err(|e| CodecError::decode(IOU_STATE_CLASS, e))?;
        if state.encode()? != payload {
            return Err(CodecError::NonCanonicalEncoding {
                reason: format!("{} payload does not re-encode to its input", IOU_STATE_CLASS),
            });
        }
        Ok(Arc::new(state))
    }
}

/// IOU contract commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum IouCommand {
    Create,
    Settle,
}

impl IouCommand {
    pub fn to_command_data(self) -> Result<CommandData, CodecError> {
        Ok(CommandData {
            class_name: IOU_COMMAND_CLASS.to_string(),
            payload: bincode::serialize(&self).map_err(|e| CodecError::encode(IOU_COMMAND_CLASS, e))?,
        })
    }
}
