//! # Adapters Layer

pub mod registry;

pub use registry::{CordappRegistry, RegistryCordappsRepository, CORDAPPS_MANIFEST};
