//! # Codec Fidelity and Editor Chain Properties
//!
//! Works on the fixture's stored IOU transaction blob directly, without the
//! runner.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use nc_01_identity_space::{IdentitySpace, NodesDirPartyRepository};
    use nc_02_transaction_codec::{
        BincodeTransactionSerializer, ContractState, OpaqueState, Serializer, TransactionComponents,
    };
    use nc_03_tx_editors::{EditorChain, MigrationContext, TxEditor};
    use nc_cordapp_iou::{IouTxEditor, IOU_STATE_CLASS};
    use std::collections::BTreeMap;
    use std::sync::Arc;

    fn context(fixture: &SnapshotFixture) -> MigrationContext {
        let space = IdentitySpace::new(
            &NodesDirPartyRepository::new(fixture.root().join("source")),
            &NodesDirPartyRepository::new(fixture.root().join("destination")),
        )
        .unwrap();
        MigrationContext::new(
            Arc::new(space),
            source_network_parameters_hash(),
            destination_network_parameters_hash(),
            BTreeMap::new(),
        )
    }

    fn decompose(serializer: &dyn Serializer, blob: &[u8]) -> TransactionComponents {
        let tx = serializer.deserialize_db_blob(blob).unwrap();
        serializer.decompose(&tx).unwrap()
    }

    fn encode(serializer: &dyn Serializer, components: &TransactionComponents) -> Vec<u8> {
        let tx = serializer.recompose(components).unwrap();
        serializer.serialize_db_blob(&tx).unwrap()
    }

    #[test]
    fn test_unedited_round_trip_is_byte_identical() {
        let fixture = SnapshotFixture::build();
        let with_schema = iou_serializer();
        let without_schema = BincodeTransactionSerializer::default();

        for serializer in [&with_schema, &without_schema] {
            let components = decompose(serializer, &fixture.source_blob);
            assert_eq!(encode(serializer, &components), fixture.source_blob);
        }
    }

    #[test]
    fn test_unknown_state_class_decodes_opaque() {
        let fixture = SnapshotFixture::build();
        let components = decompose(&BincodeTransactionSerializer::default(), &fixture.source_blob);
        let state = components.outputs[0]
            .data
            .as_any()
            .downcast_ref::<OpaqueState>()
            .unwrap();
        assert_eq!(state.class_name(), IOU_STATE_CLASS);
        assert!(components.outputs[0].data.participants().is_empty());
    }

    #[test]
    fn test_commands_lose_every_source_key() {
        let fixture = SnapshotFixture::build();
        let context = context(&fixture);
        let serializer = iou_serializer();

        let edited = EditorChain::new(vec![])
            .apply(decompose(&serializer, &fixture.source_blob), &context)
            .unwrap();

        let source_keys = fixture.source.keys();
        let destination_keys: Vec<_> = context
            .identity_space()
            .identities()
            .iter()
            .map(|m| m.destination_party().owning_key)
            .collect();
        for command in &edited.commands {
            assert!(command.signers.iter().all(|k| !source_keys.contains(k)));
            assert!(command.signers.iter().any(|k| destination_keys.contains(k)));
        }
    }

    #[test]
    fn test_builtin_chain_is_idempotent_on_migrated_data() {
        let fixture = SnapshotFixture::build();
        let context = context(&fixture);
        let serializer = iou_serializer();
        let chain = EditorChain::new(vec![]);

        let once = chain
            .apply(decompose(&serializer, &fixture.source_blob), &context)
            .unwrap();
        let once_bytes = encode(&serializer, &once);
        let twice = chain.apply(once, &context).unwrap();

        assert_eq!(encode(&serializer, &twice), once_bytes);
    }

    #[test]
    fn test_full_chain_passes_participant_check() {
        let fixture = SnapshotFixture::build();
        let context = context(&fixture);
        let serializer = iou_serializer();

        let components = decompose(&serializer, &fixture.source_blob);
        let chain = EditorChain::new(vec![Arc::new(IouTxEditor)]);
        let edited = chain.edit(components.clone(), &context).unwrap();
        EditorChain::verify_participants(&edited, &context).unwrap();

        // Without the cordapp editor the IOU still lists source parties.
        let builtin_only = EditorChain::new(vec![]).edit(components, &context).unwrap();
        assert!(EditorChain::verify_participants(&builtin_only, &context).is_err());
    }

    #[test]
    fn test_signatures_are_carried_over() {
        let fixture = SnapshotFixture::build();
        let context = context(&fixture);
        let serializer = iou_serializer();

        let source = decompose(&serializer, &fixture.source_blob);
        let edited = EditorChain::new(vec![Arc::new(IouTxEditor)])
            .apply(source.clone(), &context)
            .unwrap();
        assert_eq!(edited.signatures, source.signatures);
        assert_eq!(edited.privacy_salt, source.privacy_salt);
        assert_eq!(edited.attachments, source.attachments);
        assert_eq!(edited.time_window, source.time_window);
    }
}
