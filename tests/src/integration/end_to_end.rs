//! # End-to-End Snapshot Clone
//!
//! Runs the `cloner-runtime` runner over a fixture snapshot with three nodes
//! and one IOU transaction signed by the client:
//!
//! ```text
//! source/{client,operator,notary} ──CloneRunner──→ destination/{client,operator,notary}
//! ```
//!
//! Checks re-keyed identities, rewritten signers, notary and network
//! parameters hash, dry runs and aborting on an incomplete destination.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cloner_runtime::CloneRunner;
    use nc_01_identity_space::{NodesDirPartyRepository, PartyRepository};
    use nc_02_transaction_codec::Serializer;
    use nc_04_node_database::NodeDatabase;
    use nc_05_migration::MigrationError;
    use nc_cordapp_iou::IouState;
    use shared_types::{Party, SecureHash};
    use std::fs;

    fn destination_party(parties: &[Party], legal_name: &str) -> Party {
        parties
            .iter()
            .find(|p| p.name == name(legal_name))
            .cloned()
            .unwrap()
    }

    // =========================================================================
    // HAPPY PATH
    // =========================================================================

    #[test]
    fn test_clone_rekeys_identities_and_rewrites_transaction() {
        let fixture = SnapshotFixture::build();
        let mut config = fixture.config();
        config.export_identities = true;

        let summary = CloneRunner::new(config).run().unwrap();
        assert_eq!(summary.identities, 3);
        assert_eq!(summary.exported_identities, 3);
        let nodes: Vec<&str> = summary.reports.iter().map(|r| r.node.as_str()).collect();
        assert_eq!(nodes, vec!["client", "notary", "operator"]);

        // Three new identities: same names, keys unrelated to either side's old keys.
        let exported = NodesDirPartyRepository::new(fixture.root().join("destination"))
            .parties()
            .unwrap();
        assert_eq!(exported.len(), 3);
        for legal_name in [CLIENT, OPERATOR, NOTARY] {
            let party = destination_party(&exported, legal_name);
            assert!(!fixture.source.keys().contains(&party.owning_key));
            assert!(!fixture.destination.keys().contains(&party.owning_key));
        }
        let client = destination_party(&exported, CLIENT);
        let operator = destination_party(&exported, OPERATOR);
        let notary = destination_party(&exported, NOTARY);

        let migrated = fixture.destination_db("client").read_core_data().unwrap();
        assert_eq!(migrated.transactions.len(), 1);
        assert_eq!(migrated.transactions[0].tx_id, fixture.tx_id);

        let serializer = iou_serializer();
        let tx = serializer
            .deserialize_db_blob(&migrated.transactions[0].transaction)
            .unwrap();
        let components = serializer.decompose(&tx).unwrap();

        assert_eq!(components.commands[0].signers, vec![client.owning_key]);
        assert_eq!(components.notary, Some(notary.clone()));
        assert_eq!(components.outputs[0].notary, notary);
        assert_eq!(
            components.network_parameters_hash,
            Some(destination_network_parameters_hash())
        );

        let iou = components.outputs[0]
            .data
            .as_any()
            .downcast_ref::<IouState>()
            .unwrap();
        assert_eq!(iou.lender, client);
        assert_eq!(iou.borrower, operator);
        assert_eq!(iou.amount, fixture.iou.amount);
        assert_eq!(iou.linear_id, fixture.iou.linear_id);
    }

    #[test]
    fn test_exported_private_keys_match_exported_parties() {
        let fixture = SnapshotFixture::build();
        let mut config = fixture.config();
        config.export_identities = true;
        CloneRunner::new(config).run().unwrap();

        let records = NodesDirPartyRepository::new(fixture.root().join("destination"))
            .node_records()
            .unwrap();
        for record in records {
            let seed = fs::read_to_string(record.node_dir.join(nc_01_identity_space::NODE_KEY_FILE))
                .unwrap();
            let seed: [u8; 32] = hex::decode(seed.trim()).unwrap().try_into().unwrap();
            let private_key = nc_01_identity_space::PrivateKey::from_seed(seed);
            assert_eq!(private_key.public_key(), record.party.owning_key);
        }
    }

    #[test]
    fn test_target_hash_override() {
        let fixture = SnapshotFixture::build();
        let target = SecureHash::sha256(b"override parameters");
        let mut config = fixture.config();
        config.target_network_parameters_hash = Some(target);

        let summary = CloneRunner::new(config).run().unwrap();
        assert!(summary
            .reports
            .iter()
            .all(|r| r.target_network_parameters_hash == target));

        let migrated = fixture.destination_db("operator").read_core_data().unwrap();
        let serializer = iou_serializer();
        let tx = serializer
            .deserialize_db_blob(&migrated.transactions[0].transaction)
            .unwrap();
        let components = serializer.decompose(&tx).unwrap();
        assert_eq!(components.network_parameters_hash, Some(target));
    }

    #[test]
    fn test_parallel_run_matches_sequential_counts() {
        let sequential = SnapshotFixture::build();
        let parallel = SnapshotFixture::build();
        let mut config = parallel.config();
        config.parallel_nodes = true;

        let expected = CloneRunner::new(sequential.config()).run().unwrap();
        let actual = CloneRunner::new(config).run().unwrap();

        assert_eq!(actual.reports.len(), expected.reports.len());
        for (a, b) in actual.reports.iter().zip(&expected.reports) {
            assert_eq!(a.node, b.node);
            assert_eq!(a.total_rows(), b.total_rows());
        }
        assert_eq!(actual.total_rows(), 6);
    }

    // =========================================================================
    // DRY RUN
    // =========================================================================

    #[test]
    fn test_dry_run_writes_nothing() {
        let fixture = SnapshotFixture::build();
        let identity_file = fixture
            .destination_node_dir("client")
            .join(nc_01_identity_space::NODE_IDENTITY_FILE);
        let before = fs::read_to_string(&identity_file).unwrap();

        let mut config = fixture.config();
        config.dry_run = true;
        config.export_identities = true;
        let summary = CloneRunner::new(config).run().unwrap();

        assert!(summary.reports.iter().all(|r| r.dry_run));
        assert_eq!(summary.total_rows(), 6);
        assert_eq!(summary.exported_identities, 0);
        for node in NODES {
            assert!(fixture.destination_db(node).read_core_data().unwrap().is_empty());
        }
        assert_eq!(fs::read_to_string(&identity_file).unwrap(), before);
    }

    // =========================================================================
    // FAILURES
    // =========================================================================

    #[test]
    fn test_missing_destination_notary_aborts_run() {
        let fixture = SnapshotFixture::build();
        fs::remove_dir_all(fixture.destination_node_dir("notary")).unwrap();

        let err = CloneRunner::new(fixture.config()).run().unwrap_err();
        let migration = err.downcast_ref::<MigrationError>().unwrap();
        assert!(migration.is_mapping_not_found());
        assert_eq!(migration.node(), Some("client"));

        assert!(fixture
            .destination_db("client")
            .read_core_data()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_without_cordapps_iou_payload_passes_through() {
        let fixture = SnapshotFixture::build_without_manifest();
        let mut config = fixture.config();
        config.export_identities = true;
        CloneRunner::new(config).run().unwrap();

        let exported = NodesDirPartyRepository::new(fixture.root().join("destination"))
            .parties()
            .unwrap();
        let client = destination_party(&exported, CLIENT);

        let migrated = fixture.destination_db("client").read_core_data().unwrap();
        let serializer = iou_serializer();
        let tx = serializer
            .deserialize_db_blob(&migrated.transactions[0].transaction)
            .unwrap();
        let components = serializer.decompose(&tx).unwrap();

        // Built-in editors still ran.
        assert_eq!(components.commands[0].signers, vec![client.owning_key]);
        // Nobody rewrote the state payload.
        let iou = components.outputs[0]
            .data
            .as_any()
            .downcast_ref::<IouState>()
            .unwrap();
        assert_eq!(iou, &fixture.iou);
    }
}
