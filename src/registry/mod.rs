//! # Module Registry
//!
//! Discovers module directories under a root, activates the ones that are enabled, and
//! publishes the result as an immutable [`RegistrySnapshot`].
//!
//! ## Layout
//!
//! ```text
//! <root>/
//!   module-a/
//!     config/module.toml     descriptor (required for discovery)
//!     routes/routes.toml     route list (required for activation)
//! ```
//!
//! ## Publication
//!
//! [`ModuleRegistry::reload`] builds a complete snapshot off to the side and swaps it in
//! with a single atomic store, so readers see either the previous pass or the new one,
//! never a partially rebuilt `loaded` set. Reloads are serialised by the
//! [`RegistryActor`](actor::RegistryActor).

pub mod actor;
pub mod descriptor;
pub mod routes;
pub mod snapshot;
pub mod status;

pub use actor::{RegistryActor, RegistryClient};
pub use descriptor::{MockSettings, ModuleDescriptor};
pub use routes::{RouteMatch, RouteRegistration};
pub use snapshot::RegistrySnapshot;
pub use status::{ModuleStatus, RegistryStatus};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use arc_swap::ArcSwap;
use tracing::{debug, info, warn};

/// Errors reading descriptor or routes files. Logged and skipped, never fatal.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Malformed {}: {source}", path.display())]
    Toml {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

pub struct ModuleRegistry {
    root: PathBuf,
    snap: ArcSwap<RegistrySnapshot>,
}

impl ModuleRegistry {
    /// Creates a registry over `root` with an empty snapshot. Nothing is read until
    /// [`reload`](Self::reload) or [`bootstrap`](Self::bootstrap).
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            snap: ArcSwap::from_pointee(RegistrySnapshot::default()),
        }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Reads every immediate subdirectory's descriptor and returns the enabled ones.
    ///
    /// Directories are visited in name order. A directory without a descriptor is not a
    /// module; a malformed descriptor is skipped with a warning.
    pub fn scan(&self) -> Vec<ModuleDescriptor> {
        let entries = match std::fs::read_dir(&self.root) {
            Ok(entries) => entries,
            Err(e) => {
                warn!(root = %self.root.display(), error = %e, "Module root unreadable");
                return Vec::new();
            }
        };

        let mut dirs: Vec<PathBuf> = entries
            .filter_map(Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        dirs.sort();

        let mut found = Vec::new();
        for dir in dirs {
            match ModuleDescriptor::load(&dir) {
                Ok(Some(descriptor)) if descriptor.enabled => found.push(descriptor),
                Ok(Some(descriptor)) => debug!(module = %descriptor.name, "Module disabled"),
                Ok(None) => {}
                Err(e) => warn!(dir = %dir.display(), error = %e, "Skipping module"),
            }
        }
        debug!(root = %self.root.display(), enabled = found.len(), "Scan complete");
        found
    }

    /// Loads the module's routes and publishes them. `false` when the module has no
    /// usable routes file; the module then stays known but unloaded.
    pub fn activate(&self, descriptor: &ModuleDescriptor) -> bool {
        let Some(routes) = read_routes(descriptor) else {
            return false;
        };
        self.snap.rcu(|current| {
            let mut next = RegistrySnapshot::clone(current);
            next.insert_descriptor(descriptor.clone());
            next.mark_loaded(&descriptor.name, routes.clone());
            next
        });
        true
    }

    /// Rescans and activates every enabled module into a fresh snapshot, then publishes
    /// it in one store.
    pub fn reload(&self) -> RegistryStatus {
        let generation = self.snap.load().generation() + 1;
        let mut next = RegistrySnapshot::new(generation);
        for descriptor in self.scan() {
            if let Some(routes) = read_routes(&descriptor) {
                next.mark_loaded(&descriptor.name, routes);
            }
            next.insert_descriptor(descriptor);
        }

        let status = RegistryStatus::from(&next);
        self.snap.store(Arc::new(next));
        info!(
            generation,
            total = status.total_modules,
            loaded = status.loaded_modules,
            "Registry reloaded"
        );
        status
    }

    /// Initial load at startup, with one log line per loaded module.
    pub fn bootstrap(&self) -> RegistryStatus {
        let status = self.reload();
        let snapshot = self.snapshot();
        for name in snapshot.loaded() {
            if let Some(descriptor) = snapshot.descriptor(name) {
                info!(
                    module = %descriptor.name,
                    display_name = %descriptor.display_name,
                    version = %descriptor.version,
                    developer = %descriptor.developer,
                    "Module loaded"
                );
            }
        }
        status
    }

    /// Pure read of the current snapshot.
    pub fn status(&self) -> RegistryStatus {
        let snapshot = self.snap.load();
        RegistryStatus::from(&**snapshot)
    }

    pub fn module(&self, name: &str) -> Option<ModuleStatus> {
        let snapshot = self.snap.load();
        snapshot
            .descriptor(name)
            .map(|d| ModuleStatus::new(d, snapshot.is_loaded(name)))
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.snap.load_full()
    }
}

fn read_routes(descriptor: &ModuleDescriptor) -> Option<Vec<RouteRegistration>> {
    match routes::load_routes(descriptor) {
        Ok(Some(routes)) => Some(routes),
        Ok(None) => {
            debug!(module = %descriptor.name, "No routes file");
            None
        }
        Err(e) => {
            warn!(module = %descriptor.name, error = %e, "Routes unusable");
            None
        }
    }
}
