//! # Persisted Row Migration
//!
//! Persistent-party and vault-state rows of the client node after a clone.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cloner_runtime::CloneRunner;
    use nc_01_identity_space::{NodesDirPartyRepository, PartyRepository};
    use nc_04_node_database::NodeDatabase;
    use shared_types::AbstractParty;

    #[test]
    fn test_persistent_parties_keep_names_and_change_keys() {
        let fixture = SnapshotFixture::build();
        let mut config = fixture.config();
        config.export_identities = true;
        CloneRunner::new(config).run().unwrap();

        let destination = NodesDirPartyRepository::new(fixture.root().join("destination"))
            .parties()
            .unwrap();
        let source = fixture.source_rows("client");
        let migrated = fixture.destination_db("client").read_core_data().unwrap();

        assert_eq!(migrated.persistent_parties.len(), 2);

        let expected_names = [name(CLIENT), name(OPERATOR)];
        for (row, expected) in migrated.persistent_parties.iter().zip(&expected_names) {
            let AbstractParty::Party(party) = &row.party else {
                panic!("persistent party not resolved to a well-known party");
            };
            assert_eq!(&party.name, expected);
            assert!(destination.contains(party));
            assert!(!fixture.source.keys().contains(&party.owning_key));
            assert_ne!(party.owning_key, fixture.operator_confidential_key);
        }

        // Source rows referenced the same state, so do the migrated ones.
        assert_eq!(
            migrated.persistent_parties[0].state_ref,
            migrated.persistent_parties[1].state_ref
        );
        assert_ne!(
            migrated.persistent_parties[0].state_ref,
            source.persistent_parties[0].state_ref
        );
    }

    #[test]
    fn test_vault_state_gets_destination_notary_and_fresh_ref() {
        let fixture = SnapshotFixture::build();
        let mut config = fixture.config();
        config.export_identities = true;
        CloneRunner::new(config).run().unwrap();

        let destination = NodesDirPartyRepository::new(fixture.root().join("destination"))
            .parties()
            .unwrap();
        let notary = destination
            .iter()
            .find(|p| p.name.contains_ignore_case("notary"))
            .unwrap();

        let source = fixture.source_rows("client").vault_states.remove(0);
        let migrated = fixture.destination_db("client").read_core_data().unwrap();
        assert_eq!(migrated.vault_states.len(), 1);
        let row = &migrated.vault_states[0];

        assert_eq!(&row.notary, notary);
        assert_ne!(row.state_ref, source.state_ref);
        assert_ne!(row.state_ref.txhash, fixture.tx_id);
        assert_eq!(row.state_ref.index, source.state_ref.index);
        assert_eq!(row.state_ref, migrated.persistent_parties[0].state_ref);

        assert_eq!(row.contract_state_class_name, source.contract_state_class_name);
        assert_eq!(row.state_status, source.state_status);
        assert_eq!(row.recorded_time, source.recorded_time);
        assert_eq!(row.relevancy_status, source.relevancy_status);
        assert_eq!(row.constraint_type, source.constraint_type);
    }

    #[test]
    fn test_destination_metadata_is_kept() {
        let fixture = SnapshotFixture::build();
        CloneRunner::new(fixture.config()).run().unwrap();

        for node in NODES {
            let db = fixture.destination_db(node);
            assert_eq!(
                db.read_network_parameters_hash().unwrap(),
                destination_network_parameters_hash()
            );
        }
        // The notary holds no core rows on either side.
        assert!(fixture
            .destination_db("notary")
            .read_core_data()
            .unwrap()
            .is_empty());
    }

    #[test]
    fn test_source_databases_are_untouched() {
        let fixture = SnapshotFixture::build();
        CloneRunner::new(fixture.config()).run().unwrap();

        for node in NODES {
            assert_eq!(
                fixture.source_db(node).read_core_data().unwrap(),
                fixture.source_rows(node)
            );
        }
    }
}
