//! # IOU Cordapp
//!
//! A minimal application plugin. An [`IouState`] records that a borrower
//! owes a lender an amount; both are participants. The state payload is only
//! understood by this crate, so it also supplies [`IouTxEditor`], which
//! rewrites lender and borrower to their destination identities.
//!
//! Registered under the manifest name `iou`.

mod cordapp;
mod editor;
mod state;

pub use cordapp::{IouCordapp, IOU_CORDAPP_NAME};
pub use editor::IouTxEditor;
pub use state::{
    IouCommand, IouSchema, IouState, IOU_COMMAND_CLASS, IOU_CONTRACT_CLASS, IOU_STATE_CLASS,
};
