//! # Cordapp Resolution and Serializer Cache
//!
//! Plugin manifests decide which cordapp editors and schemas a snapshot uses.
//! The serializer cache is keyed by snapshot and plugin directory, so one
//! snapshot's plugin set never leaks into another's run.

#[cfg(test)]
mod tests {
    use crate::fixtures::*;
    use cloner_runtime::{default_registry, CloneRunner};
    use nc_01_identity_space::{IdentitySpace, NodesDirPartyRepository};
    use nc_02_transaction_codec::Serializer;
    use nc_03_tx_editors::CordappError;
    use nc_04_node_database::NodeDatabase;
    use nc_05_migration::{
        CacheKey, LoadedCordapps, MigrationError, MigrationOptions, NodeMigrationService,
        SerializerCache, SnapshotId,
    };
    use nc_cordapp_iou::{IouState, IOU_STATE_CLASS};
    use std::sync::Arc;

    fn client_iou(fixture: &SnapshotFixture) -> IouState {
        let migrated = fixture.destination_db("client").read_core_data().unwrap();
        let serializer = iou_serializer();
        let tx = serializer
            .deserialize_db_blob(&migrated.transactions[0].transaction)
            .unwrap();
        let components = serializer.decompose(&tx).unwrap();
        components.outputs[0]
            .data
            .as_any()
            .downcast_ref::<IouState>()
            .unwrap()
            .clone()
    }

    fn cache_key(fixture: &SnapshotFixture) -> CacheKey {
        CacheKey::new(SnapshotId::from_path(fixture.root()), &fixture.plugins_dir())
    }

    #[test]
    fn test_manifest_resolves_iou_cordapp() {
        let fixture = SnapshotFixture::build();
        let cache = SerializerCache::new();
        let loaded = cache
            .load_plugins(
                &SnapshotId::from_path(fixture.root()),
                &fixture.plugins_dir(),
                &default_registry(),
            )
            .unwrap();

        assert_eq!(loaded.editor_names(), vec!["IouTxEditor"]);

        let space = Arc::new(
            IdentitySpace::new(
                &NodesDirPartyRepository::new(fixture.root().join("source")),
                &NodesDirPartyRepository::new(fixture.root().join("destination")),
            )
            .unwrap(),
        );
        let service = NodeMigrationService::with_cordapps(space, &loaded, MigrationOptions::default());
        assert_eq!(
            service.chain().editor_names(),
            vec![
                "TxCommandsEditor",
                "TxNotaryEditor",
                "TxNetworkParametersHashEditor",
                "IouTxEditor"
            ]
        );
    }

    #[test]
    fn test_unknown_cordapp_in_manifest_fails_run() {
        let fixture = SnapshotFixture::build_without_manifest();
        fixture.write_manifest(&["iou", "obligation"]);

        let err = CloneRunner::new(fixture.config()).run().unwrap_err();
        let migration = err.downcast_ref::<MigrationError>().unwrap();
        assert!(matches!(
            migration,
            MigrationError::Cordapps(CordappError::UnknownCordapp { name, .. }) if name == "obligation"
        ));
        assert_eq!(migration.node(), None);
    }

    #[test]
    fn test_cache_keeps_snapshots_apart() {
        let cache = Arc::new(SerializerCache::new());
        let with_iou = SnapshotFixture::build();
        let without = SnapshotFixture::build_without_manifest();

        CloneRunner::new(with_iou.config())
            .with_cache(cache.clone())
            .run()
            .unwrap();
        CloneRunner::new(without.config())
            .with_cache(cache.clone())
            .run()
            .unwrap();
        assert_eq!(cache.len(), 2);

        // Only the snapshot that lists the IOU cordapp had its payload rewritten.
        assert_ne!(client_iou(&with_iou), with_iou.iou);
        assert_eq!(client_iou(&without), without.iou);

        let cached = cache
            .get_or_load(&cache_key(&with_iou), || {
                unreachable!("snapshot should be cached")
            })
            .unwrap();
        assert_eq!(cached.editor_names(), vec!["IouTxEditor"]);
        let cached = cache
            .get_or_load(&cache_key(&without), || {
                unreachable!("snapshot should be cached")
            })
            .unwrap();
        assert!(cached.editor_names().is_empty());
    }

    #[test]
    fn test_invalidate_picks_up_new_manifest() {
        let cache = Arc::new(SerializerCache::new());
        let fixture = SnapshotFixture::build_without_manifest();
        let runner = CloneRunner::new(fixture.config()).with_cache(cache.clone());

        runner.run().unwrap();
        assert_eq!(client_iou(&fixture), fixture.iou);

        fixture.write_manifest(&["iou"]);
        runner.run().unwrap();
        // Still the cached, cordapp-less entry.
        assert_eq!(client_iou(&fixture), fixture.iou);

        assert!(cache.invalidate(&SnapshotId::from_path(fixture.root())));
        runner.run().unwrap();
        let migrated = client_iou(&fixture);
        assert_eq!(migrated.lender.name, fixture.iou.lender.name);
        assert_ne!(migrated.lender.owning_key, fixture.iou.lender.owning_key);
    }

    #[test]
    fn test_switching_plugins_dir_reloads_cordapps() {
        let cache = Arc::new(SerializerCache::new());
        let fixture = SnapshotFixture::build_without_manifest();
        CloneRunner::new(fixture.config())
            .with_cache(cache.clone())
            .run()
            .unwrap();

        let other_plugins = fixture.root().join("other-plugins");
        std::fs::create_dir_all(&other_plugins).unwrap();
        std::fs::write(
            other_plugins.join(nc_03_tx_editors::CORDAPPS_MANIFEST),
            r#"{"cordapps": ["missing"]}"#,
        )
        .unwrap();
        let mut config = fixture.config();
        config.plugins_dir = Some(other_plugins);

        let err = CloneRunner::new(config).with_cache(cache.clone()).run().unwrap_err();
        let migration = err.downcast_ref::<MigrationError>().unwrap();
        assert!(matches!(
            migration,
            MigrationError::Cordapps(CordappError::UnknownCordapp { name, .. }) if name == "missing"
        ));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_loaded_cordapps_schema_set() {
        let fixture = SnapshotFixture::build();
        let repository =
            nc_03_tx_editors::RegistryCordappsRepository::load(&fixture.plugins_dir(), &default_registry())
                .unwrap();
        let loaded = LoadedCordapps::from_repository(&repository);
        let tx = loaded.serializer.deserialize_db_blob(&fixture.source_blob).unwrap();
        let components = loaded.serializer.decompose(&tx).unwrap();
        assert_eq!(components.outputs[0].data.class_name(), IOU_STATE_CLASS);
        assert!(components.outputs[0]
            .data
            .as_any()
            .downcast_ref::<IouState>()
            .is_some());
    }
}
