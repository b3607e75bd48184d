//! # Network Cloner Benchmarks
//!
//! | Area | Measured |
//! |------|----------|
//! | nc-02 Transaction Codec | decode + decompose + recompose + encode of one IOU transaction |
//! | nc-05 Migration | `migrate_data` over a node with many IOU transactions |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use nc_01_identity_space::{IdentitySpace, NodesDirPartyRepository};
use nc_02_transaction_codec::Serializer;
use nc_03_tx_editors::{MigrationContext, TxEditor};
use nc_04_node_database::MigrationData;
use nc_05_migration::{LoadedCordapps, MigrationOptions, NodeMigrationService};
use nc_cordapp_iou::IouTxEditor;
use nc_tests::fixtures::{
    destination_network_parameters_hash, iou_serializer, source_network_parameters_hash,
    SnapshotFixture,
};
use std::collections::BTreeMap;
use std::sync::Arc;

fn bench_codec_round_trip(c: &mut Criterion) {
    let fixture = SnapshotFixture::build();
    let serializer = iou_serializer();

    c.bench_function("nc-02-codec-round-trip", |b| {
        b.iter(|| {
            let tx = serializer.deserialize_db_blob(black_box(&fixture.source_blob)).unwrap();
            let components = serializer.decompose(&tx).unwrap();
            let tx = serializer.recompose(&components).unwrap();
            serializer.serialize_db_blob(&tx).unwrap()
        })
    });
}

fn bench_migrate_node(c: &mut Criterion) {
    let fixture = SnapshotFixture::build();
    let space = Arc::new(
        IdentitySpace::new(
            &NodesDirPartyRepository::new(fixture.root().join("source")),
            &NodesDirPartyRepository::new(fixture.root().join("destination")),
        )
        .unwrap(),
    );
    let cordapps = LoadedCordapps {
        serializer: Arc::new(iou_serializer()),
        tx_editors: vec![Arc::new(IouTxEditor) as Arc<dyn TxEditor>],
    };
    let service = NodeMigrationService::with_cordapps(space.clone(), &cordapps, MigrationOptions::default());
    let context = MigrationContext::new(
        space,
        source_network_parameters_hash(),
        destination_network_parameters_hash(),
        BTreeMap::new(),
    );
    let template = fixture.source_rows("client");

    let mut group = c.benchmark_group("nc-05-migration");
    for count in [10usize, 100, 1_000] {
        let data = MigrationData {
            transactions: vec![template.transactions[0].clone(); count],
            ..template.clone()
        };
        group.throughput(Throughput::Elements(count as u64));
        group.bench_with_input(BenchmarkId::new("migrate_data", count), &data, |b, data| {
            b.iter(|| service.migrate_data("client", black_box(data), &context).unwrap())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_codec_round_trip, bench_migrate_node);
criterion_main!(benches);
