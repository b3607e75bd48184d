//! # Adapters Layer

mod bincode;

pub use self::bincode::BincodeTransactionSerializer;
