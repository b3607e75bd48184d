//! # Cordapp Registry
//!
//! Cordapps are compiled in and registered by name. A snapshot selects the
//! ones it needs through `tx-editor-plugins/cordapps.json`:
//!
//! ```json
//! { "cordapps": ["iou"] }
//! ```
//!
//! A plugin directory without a manifest selects nothing.

use crate::domain::CordappError;
use crate::ports::{Cordapp, CordappsRepository, TxEditor};
use nc_02_transaction_codec::SchemaRegistry;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

/// Manifest file inside a plugin directory.
pub const CORDAPPS_MANIFEST: &str = "cordapps.json";

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct CordappsManifest {
    cordapps: Vec<String>,
}

/// Every cordapp this build knows about.
#[derive(Clone, Default)]
pub struct CordappRegistry {
    cordapps: BTreeMap<String, Arc<dyn Cordapp>>,
}

impl CordappRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, cordapp: Arc<dyn Cordapp>) {
        self.cordapps.insert(cordapp.name().to_string(), cordapp);
    }

    pub fn with_cordapp(mut self, cordapp: Arc<dyn Cordapp>) -> Self {
        self.register(cordapp);
        self
    }

    pub fn get(&self, name: &str) -> Option<Arc<dyn Cordapp>> {
        self.cordapps.get(name).cloned()
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cordapps.keys().map(String::as_str)
    }
}

impl fmt::Debug for CordappRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(self.cordapps.keys()).finish()
    }
}

/// Cordapps selected for one snapshot, in manifest order.
#[derive(Clone)]
pub struct RegistryCordappsRepository {
    plugins_dir: PathBuf,
    cordapps: Vec<Arc<dyn Cordapp>>,
}

impl RegistryCordappsRepository {
    /// Resolve `plugins_dir/cordapps.json` against the registry.
    pub fn load(plugins_dir: &Path, registry: &CordappRegistry) -> Result<Self, CordappError> {
        let path = plugins_dir.join(CORDAPPS_MANIFEST);
        let contents = match fs::read_to_string(&path) {
            Ok(contents) => contents,
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("[nc-03] No plugin manifest at {}", path.display());
                return Ok(Self::from_cordapps(plugins_dir, Vec::new()));
            }
            Err(source) => return Err(CordappError::Io { path, source }),
        };

        let manifest: CordappsManifest =
            serde_json::from_str(&contents).map_err(|e| CordappError::MalformedManifest {
                path: path.clone(),
                reason: e.to_string(),
            })?;

        let mut cordapps = Vec::with_capacity(manifest.cordapps.len());
        for name in manifest.cordapps {
            if cordapps.iter().any(|c: &Arc<dyn Cordapp>| c.name() == name) {
                debug!("[nc-03] Cordapp '{}' listed twice, ignored", name);
                continue;
            }
            let cordapp = registry
                .get(&name)
                .ok_or_else(|| CordappError::UnknownCordapp {
                    name: name.clone(),
                    path: path.clone(),
                })?;
            cordapps.push(cordapp);
        }

        info!(
            "[nc-03] Loaded {} cordapp(s) from {}",
            cordapps.len(),
            plugins_dir.display()
        );
        Ok(Self::from_cordapps(plugins_dir, cordapps))
    }

    pub fn from_cordapps(plugins_dir: impl Into<PathBuf>, cordapps: Vec<Arc<dyn Cordapp>>) -> Self {
        Self {
            plugins_dir: plugins_dir.into(),
            cordapps,
        }
    }

    pub fn plugins_dir(&self) -> &Path {
        &self.plugins_dir
    }

    pub fn cordapp_names(&self) -> Vec<&str> {
        self.cordapps.iter().map(|c| c.name()).collect()
    }
}

impl CordappsRepository for RegistryCordappsRepository {
    fn tx_editors(&self) -> Vec<Arc<dyn TxEditor>> {
        self.cordapps
            .iter()
            .flat_map(|cordapp| cordapp.tx_editors())
            .collect()
    }

    fn schemas(&self) -> SchemaRegistry {
        let mut registry = SchemaRegistry::new();
        for schema in self.cordapps.iter().flat_map(|cordapp| cordapp.schemas()) {
            registry.register(schema);
        }
        registry
    }
}

impl fmt::Debug for RegistryCordappsRepository {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RegistryCordappsRepository")
            .field("plugins_dir", &self.plugins_dir)
            .field("cordapps", &self.cordapp_names())
            .finish()
    }
}
