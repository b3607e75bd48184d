//! # Adapters Layer

mod database;
mod file;
mod memory;
#[cfg(feature = "rocksdb")]
mod rocksdb_adapter;

pub use database::KvNodeDatabase;
pub use file::FileBackedKVStore;
pub use memory::InMemoryKVStore;
#[cfg(feature = "rocksdb")]
pub use rocksdb_adapter::{RocksDbConfig, RocksDbStore};
