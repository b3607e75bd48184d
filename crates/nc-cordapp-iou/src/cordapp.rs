use crate::editor::IouTxEditor;
use crate::state::IouSchema;
use nc_02_transaction_codec::StateSchema;
use nc_03_tx_editors::{Cordapp, TxEditor};
use std::sync::Arc;

/// Manifest name of the IOU cordapp.
pub const IOU_CORDAPP_NAME: &str = "iou";

#[derive(Debug, Clone, Copy, Default)]
pub struct IouCordapp;

impl Cordapp for IouCordapp {
    fn name(&self) -> &str {
        IOU_CORDAPP_NAME
    }

    fn schemas(&self) -> Vec<Arc<dyn StateSchema>> {
        vec![Arc::new(IouSchema)]
    }

    fn tx_editors(&self) -> Vec<Arc<dyn TxEditor>> {
        vec![Arc::new(IouTxEditor)]
    }
}
