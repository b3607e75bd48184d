use crate::domain::{
    AttachmentConstraint, CodecError, Command, CommandData, ComponentGroup, ComponentGroupKind,
    DbBlob, SchemaRegistry, SignedTransaction, TimeWindow, TransactionComponents,
    TransactionState, WireTransaction, DB_BLOB_MAGIC, WIRE_SCHEMA_VERSION,
};
use crate::ports::Serializer;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared_types::{Party, PublicKey, SecureHash, StateRef};
use tracing::trace;

/// Magic plus little-endian schema version.
const ENVELOPE_PREFIX_LEN: usize = 6;

/// Output component as stored on the wire.
#[derive(Serialize, Deserialize)]
struct OutputComponent {
    class_name: String,
    payload: Vec<u8>,
    contract: String,
    notary: Party,
    encumbrance: Option<u32>,
    constraint: AttachmentConstraint,
}

/// Default transaction serializer using bincode.
///
/// Output payloads are decoded through the schema registry it was built with.
#[derive(Debug, Clone, Default)]
pub struct BincodeTransactionSerializer {
    schemas: SchemaRegistry,
}

impl BincodeTransactionSerializer {
    pub fn new(schemas: SchemaRegistry) -> Self {
        Self { schemas }
    }

    pub fn schemas(&self) -> &SchemaRegistry {
        &self.schemas
    }
}

impl Serializer for BincodeTransactionSerializer {
    fn deserialize_db_blob(&self, blob: &[u8]) -> Result<SignedTransaction, CodecError> {
        if blob.len() < ENVELOPE_PREFIX_LEN {
            return Err(CodecError::decode("db blob", "truncated envelope"));
        }
        let mut magic = [0u8; 4];
        magic.copy_from_slice(&blob[..4]);
        if magic != DB_BLOB_MAGIC {
            return Err(CodecError::BadMagic { found: magic });
        }
        let version = u16::from_le_bytes([blob[4], blob[5]]);
        if version != WIRE_SCHEMA_VERSION {
            return Err(CodecError::UnsupportedSchemaVersion {
                found: version,
                supported: WIRE_SCHEMA_VERSION,
            });
        }

        let envelope: DbBlob = strict_decode("db blob", blob)?;
        envelope.transaction.wire.validate_layout()?;
        trace!(
            "[nc-02] Decoded transaction {} ({} bytes)",
            envelope.transaction.id(),
            blob.len()
        );
        Ok(envelope.transaction)
    }

    fn serialize_db_blob(&self, transaction: &SignedTransaction) -> Result<Vec<u8>, CodecError> {
        transaction.wire.validate_layout()?;
        let envelope = DbBlob::new(transaction.clone());
        bincode::serialize(&envelope).map_err(|e| CodecError::encode("db blob", e))
    }

    fn decompose(
        &self,
        transaction: &SignedTransaction,
    ) -> Result<TransactionComponents, CodecError> {
        let wire = &transaction.wire;
        wire.validate_layout()?;

        let inputs: Vec<StateRef> = decode_group(wire, ComponentGroupKind::Inputs)?;
        let attachments: Vec<SecureHash> = decode_group(wire, ComponentGroupKind::Attachments)?;
        let references: Vec<StateRef> = decode_group(wire, ComponentGroupKind::References)?;
        let notary: Option<Party> = decode_group(wire, ComponentGroupKind::Notary)?.pop();
        let time_window: Option<TimeWindow> =
            decode_group(wire, ComponentGroupKind::TimeWindow)?.pop();
        let network_parameters_hash: Option<SecureHash> =
            decode_group(wire, ComponentGroupKind::Parameters)?.pop();

        let command_data: Vec<CommandData> = decode_group(wire, ComponentGroupKind::Commands)?;
        let signers: Vec<Vec<PublicKey>> = decode_group(wire, ComponentGroupKind::Signers)?;
        let commands = command_data
            .into_iter()
            .zip(signers)
            .map(|(value, signers)| Command { value, signers })
            .collect();

        let outputs = decode_group::<OutputComponent>(wire, ComponentGroupKind::Outputs)?
            .into_iter()
            .enumerate()
            .map(|(index, output)| {
                let data = self
                    .schemas
                    .decode_state(&output.class_name, &output.payload)
                    .map_err(|e| CodecError::MalformedComponent {
                        group: ComponentGroupKind::Outputs,
                        index,
                        reason: e.to_string(),
                    })?;
                Ok(TransactionState {
                    data,
                    contract: output.contract,
                    notary: output.notary,
                    encumbrance: output.encumbrance,
                    constraint: output.constraint,
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;

        Ok(TransactionComponents {
            inputs,
            outputs,
            commands,
            attachments,
            notary,
            time_window,
            references,
            network_parameters_hash,
            privacy_salt: wire.privacy_salt,
            signatures: transaction.sigs.clone(),
        })
    }

    fn recompose(
        &self,
        components: &TransactionComponents,
    ) -> Result<SignedTransaction, CodecError> {
        let outputs = components
            .outputs
            .iter()
            .map(|output| {
                Ok(OutputComponent {
                    class_name: output.data.class_name().to_string(),
                    payload: output.data.encode()?,
                    contract: output.contract.clone(),
                    notary: output.notary.clone(),
                    encumbrance: output.encumbrance,
                    constraint: output.constraint.clone(),
                })
            })
            .collect::<Result<Vec<_>, CodecError>>()?;
        let command_data: Vec<&CommandData> =
            components.commands.iter().map(|c| &c.value).collect();
        let signers: Vec<&Vec<PublicKey>> =
            components.commands.iter().map(|c| &c.signers).collect();

        let mut groups = Vec::new();
        push_group(&mut groups, ComponentGroupKind::Inputs, &components.inputs)?;
        push_group(&mut groups, ComponentGroupKind::Outputs, &outputs)?;
        push_group(&mut groups, ComponentGroupKind::Commands, &command_data)?;
        push_group(&mut groups, ComponentGroupKind::Attachments, &components.attachments)?;
        push_group(
            &mut groups,
            ComponentGroupKind::Notary,
            components.notary.as_slice(),
        )?;
        push_group(
            &mut groups,
            ComponentGroupKind::TimeWindow,
            components.time_window.as_slice(),
        )?;
        push_group(&mut groups, ComponentGroupKind::Signers, &signers)?;
        push_group(&mut groups, ComponentGroupKind::References, &components.references)?;
        push_group(
            &mut groups,
            ComponentGroupKind::Parameters,
            components.network_parameters_hash.as_slice(),
        )?;

        Ok(SignedTransaction {
            wire: WireTransaction {
                component_groups: groups,
                privacy_salt: components.privacy_salt,
            },
            sigs: components.signatures.clone(),
        })
    }
}

/// Decode and require that re-encoding reproduces the input exactly.
fn strict_decode<T>(what: &str, bytes: &[u8]) -> Result<T, CodecError>
where
    T: Serialize + DeserializeOwned,
{
    let value: T = bincode::deserialize(bytes).map_err(|e| CodecError::decode(what, e))?;
    let canonical = bincode::serialize(&value).map_err(|e| CodecError::encode(what, e))?;
    if canonical != bytes {
        return Err(CodecError::NonCanonicalEncoding {
            reason: format!("{} does not re-encode to its input", what),
        });
    }
    Ok(value)
}

fn decode_group<T>(wire: &WireTransaction, kind: ComponentGroupKind) -> Result<Vec<T>, CodecError>
where
    T: Serialize + DeserializeOwned,
{
    wire.group(kind)
        .iter()
        .enumerate()
        .map(|(index, bytes)| {
            strict_decode(&format!("{:?} component", kind), bytes).map_err(|e| {
                CodecError::MalformedComponent {
                    group: kind,
                    index,
                    reason: e.to_string(),
                }
            })
        })
        .collect()
}

fn push_group<T: Serialize>(
    groups: &mut Vec<ComponentGroup>,
    kind: ComponentGroupKind,
    items: &[T],
) -> Result<(), CodecError> {
    if items.is_empty() {
        return Ok(());
    }
    let components = items
        .iter()
        .map(|item| {
            bincode::serialize(item).map_err(|e| CodecError::encode(format!("{:?} component", kind), e))
        })
        .collect::<Result<Vec<_>, _>>()?;
    groups.push(ComponentGroup::new(kind, components));
    Ok(())
}
