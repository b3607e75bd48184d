//! # Network Cloner
//!
//! Migrates every node of a snapshot from the source network to the
//! destination network.
//!
//! ```text
//! network-cloner --snapshot-dir ./snapshot [--dry-run] [--parallel-nodes]
//! ```
//!
//! Settings resolve as defaults, then `NC_*` environment variables, then flags.
//! Log verbosity follows `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use cloner_runtime::container::config::parse_hash;
use cloner_runtime::{CloneRunner, ClonerConfig, StorageBackend};

#[derive(Parser, Debug)]
#[command(name = "network-cloner")]
#[command(about = "Clone a snapshot of ledger nodes onto a new network")]
#[command(version)]
struct Args {
    /// Snapshot directory holding source/, destination/ and tx-editor-plugins/
    #[arg(short, long)]
    snapshot_dir: Option<PathBuf>,

    /// Plugin directory (default: <snapshot>/tx-editor-plugins)
    #[arg(short, long)]
    plugins_dir: Option<PathBuf>,

    /// Node database backend: file or rocksdb
    #[arg(short = 'b', long)]
    storage_backend: Option<StorageBackend>,

    /// Network parameters hash (hex) to stamp on every transaction
    #[arg(long)]
    target_network_parameters_hash: Option<String>,

    /// Migrate nodes concurrently
    #[arg(long)]
    parallel_nodes: bool,

    /// Run the migration without writing destination databases
    #[arg(long)]
    dry_run: bool,

    /// Write the new identities into the destination node directories
    #[arg(long)]
    export_identities: bool,
}

impl Args {
    fn apply(self, config: &mut ClonerConfig) -> Result<()> {
        if let Some(dir) = self.snapshot_dir {
            config.snapshot_dir = dir;
        }
        if let Some(dir) = self.plugins_dir {
            config.plugins_dir = Some(dir);
        }
        if let Some(backend) = self.storage_backend {
            config.storage_backend = backend;
        }
        if let Some(hash) = self.target_network_parameters_hash {
            config.target_network_parameters_hash = Some(parse_hash(&hash)?);
        }
        config.parallel_nodes |= self.parallel_nodes;
        config.dry_run |= self.dry_run;
        config.export_identities |= self.export_identities;
        Ok(())
    }
}

fn main() -> Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_target(true)
        .with_thread_ids(true)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to install tracing subscriber")?;

    let args = Args::parse();
    let mut config = ClonerConfig::from_env().context("Invalid NC_* environment")?;
    args.apply(&mut config).context("Invalid command-line arguments")?;

    info!("===========================================");
    info!("  Network Cloner v{}", env!("CARGO_PKG_VERSION"));
    info!("===========================================");
    info!("Snapshot: {}", config.snapshot_dir.display());
    info!("Storage backend: {}", config.storage_backend);
    if config.dry_run {
        info!("Dry run: destination databases will not be written");
    }

    let summary = CloneRunner::new(config).run()?;
    for report in &summary.reports {
        info!("  {}", report);
    }
    info!(
        "Clone complete: {} nodes, {} rows, {} identities exported",
        summary.reports.len(),
        summary.total_rows(),
        summary.exported_identities
    );
    Ok(())
}
