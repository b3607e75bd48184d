//! # Clone Runner
//!
//! Drives one snapshot end to end:
//!
//! 1. Build the identity space from `source/` and `destination/` identities
//! 2. Resolve the snapshot's cordapps through the serializer cache
//! 3. Migrate every paired node, sequentially or on the rayon pool
//! 4. Optionally export the new identities into `destination/`

use crate::container::{ClonerConfig, StorageBackend};
use crate::snapshot::{open_node_database, NodePair, SnapshotLayout};
use anyhow::{Context, Result};
use nc_01_identity_space::{IdentitySpace, IdentitySpaceApi, NodesDirPartyRepository};
use nc_03_tx_editors::CordappRegistry;
use nc_05_migration::{
    MigrationOptions, MigrationReport, NodeMigrationService, SerializerCache, SnapshotId,
};
use nc_cordapp_iou::IouCordapp;
use rayon::prelude::*;
use std::sync::Arc;
use tracing::info;

/// Every cordapp compiled into this binary.
pub fn default_registry() -> CordappRegistry {
    CordappRegistry::new().with_cordapp(Arc::new(IouCordapp))
}

/// Outcome of a snapshot run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CloneSummary {
    /// One report per migrated node, ordered by node name.
    pub reports: Vec<MigrationReport>,
    /// Identities in the mapping.
    pub identities: usize,
    /// Destination nodes whose identity files were rewritten.
    pub exported_identities: usize,
}

impl CloneSummary {
    pub fn total_rows(&self) -> usize {
        self.reports.iter().map(MigrationReport::total_rows).sum()
    }
}

pub struct CloneRunner {
    config: ClonerConfig,
    registry: CordappRegistry,
    cache: Arc<SerializerCache>,
}

impl CloneRunner {
    pub fn new(config: ClonerConfig) -> Self {
        Self {
            config,
            registry: default_registry(),
            cache: Arc::new(SerializerCache::new()),
        }
    }

    pub fn with_registry(mut self, registry: CordappRegistry) -> Self {
        self.registry = registry;
        self
    }

    /// Share a serializer cache between runners.
    pub fn with_cache(mut self, cache: Arc<SerializerCache>) -> Self {
        self.cache = cache;
        self
    }

    pub fn config(&self) -> &ClonerConfig {
        &self.config
    }

    pub fn cache(&self) -> &SerializerCache {
        &self.cache
    }

    pub fn run(&self) -> Result<CloneSummary> {
        self.config.validate().context("Invalid cloner configuration")?;

        let layout = SnapshotLayout::new(&self.config.snapshot_dir);
        info!("[cloner] Cloning snapshot {}", layout.root().display());

        let source_repository = NodesDirPartyRepository::new(layout.source_dir());
        let destination_repository = NodesDirPartyRepository::new(layout.destination_dir());
        let identity_space = Arc::new(
            IdentitySpace::new(&source_repository, &destination_repository)
                .context("Failed to build identity space")?,
        );
        info!(
            "[cloner] Identity space holds {} mappings",
            identity_space.identities().len()
        );

        let snapshot_id = SnapshotId::from_path(layout.root());
        let plugins_dir = self.config.plugins_dir();
        let cordapps = self
            .cache
            .load_plugins(&snapshot_id, &plugins_dir, &self.registry)
            .with_context(|| format!("Failed to load cordapps from {}", plugins_dir.display()))?;
        info!(
            "[cloner] Cordapp transaction editors: [{}]",
            cordapps.editor_names().join(", ")
        );

        let options = MigrationOptions {
            target_network_parameters_hash: self.config.target_network_parameters_hash,
            dry_run: self.config.dry_run,
            ..MigrationOptions::default()
        };
        let service = NodeMigrationService::with_cordapps(identity_space.clone(), &cordapps, options);

        let pairs = layout
            .node_pairs()
            .with_context(|| format!("Failed to list nodes in {}", layout.root().display()))?;

        let backend = self.config.storage_backend;
        let reports = if self.config.parallel_nodes {
            pairs
                .par_iter()
                .map(|pair| migrate_pair(&service, pair, backend))
                .collect::<Result<Vec<_>>>()?
        } else {
            pairs
                .iter()
                .map(|pair| migrate_pair(&service, pair, backend))
                .collect::<Result<Vec<_>>>()?
        };

        let exported_identities = if !self.config.export_identities {
            0
        } else if self.config.dry_run {
            info!("[cloner] Dry run, destination identities left untouched");
            0
        } else {
            destination_repository
                .export_identities(identity_space.identities())
                .context("Failed to export destination identities")?
        };

        let summary = CloneSummary {
            reports,
            identities: identity_space.identities().len(),
            exported_identities,
        };
        info!(
            "[cloner] Migrated {} nodes, {} rows",
            summary.reports.len(),
            summary.total_rows()
        );
        Ok(summary)
    }
}

fn migrate_pair(
    service: &NodeMigrationService,
    pair: &NodePair,
    backend: StorageBackend,
) -> Result<MigrationReport> {
    let source_db = open_node_database(&pair.source_dir, backend)
        .with_context(|| format!("Failed to open source database of node {}", pair.name))?;
    let mut destination_db = open_node_database(&pair.destination_dir, backend)
        .with_context(|| format!("Failed to open destination database of node {}", pair.name))?;

    service
        .migrate_node(&pair.name, source_db.as_ref(), destination_db.as_mut())
        .with_context(|| format!("Migration of node {} failed", pair.name))
}
