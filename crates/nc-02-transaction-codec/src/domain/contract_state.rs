//! # Contract States
//!
//! Output payloads are application data. The codec only knows them through
//! [`ContractState`]; cordapps contribute a [`StateSchema`] per state class so
//! that payloads can be decoded into something editors can inspect.
//!
//! A class without a registered schema decodes to [`OpaqueState`], which keeps
//! its bytes verbatim and exposes no participants.

use crate::domain::errors::CodecError;
use shared_types::AbstractParty;
use std::any::Any;
use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

/// Decoded application state carried by a transaction output.
pub trait ContractState: fmt::Debug + Send + Sync {
    /// Fully qualified state class, used to find the schema on decode.
    fn class_name(&self) -> &str;

    /// Parties that must be able to see and consume this state.
    fn participants(&self) -> Vec<AbstractParty>;

    /// Payload bytes as written to the output component.
    fn encode(&self) -> Result<Vec<u8>, CodecError>;

    /// Downcast hook for application editors.
    fn as_any(&self) -> &dyn Any;
}

/// Decoder for one state class.
pub trait StateSchema: Send + Sync {
    fn class_name(&self) -> &str;

    fn decode(&self, payload: &[u8]) -> Result<Arc<dyn ContractState>, CodecError>;
}

/// State whose class no loaded cordapp understands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpaqueState {
    class_name: String,
    payload: Vec<u8>,
}

impl OpaqueState {
    pub fn new(class_name: impl Into<String>, payload: Vec<u8>) -> Self {
        Self {
            class_name: class_name.into(),
            payload,
        }
    }

    pub fn payload(&self) -> &[u8] {
        &self.payload
    }
}

impl ContractState for OpaqueState {
    fn class_name(&self) -> &str {
        &self.class_name
    }

    fn participants(&self) -> Vec<AbstractParty> {
        Vec::new()
    }

    fn encode(&self) -> Result<Vec<u8>, CodecError> {
        Ok(self.payload.clone())
    }

    fn as_any(&self) -> &dyn Any {
        self
    }
}

/// State schemas by class name.
#[derive(Clone, Default)]
pub struct SchemaRegistry {
    schemas: BTreeMap<String, Arc<dyn StateSchema>>,
}

impl SchemaRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a schema. A later registration for the same class wins.
    pub fn register(&mut self, schema: Arc<dyn StateSchema>) {
        self.schemas.insert(schema.class_name().to_string(), schema);
    }

    pub fn with_schema(mut self, schema: Arc<dyn StateSchema>) -> Self {
        self.register(schema);
        self
    }

    pub fn contains(&self, class_name: &str) -> bool {
        self.schemas.contains_key(class_name)
    }

    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        self.schemas.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.schemas.len()
    }

    pub fn is_empty(&self) -> bool {
        self.schemas.is_empty()
    }

    /// Decode a payload with the registered schema, or keep it opaque.
    pub fn decode_state(
        &self,
        class_name: &str,
        payload: &[u8],
    ) -> Result<Arc<dyn ContractState>, CodecError> {
        match self.schemas.get(class_name) {
            Some(schema) => schema.decode(payload),
            None => Ok(Arc::new(OpaqueState::new(class_name, payload.to_vec()))),
        }
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.schemas.keys()).finish()
    }
}
