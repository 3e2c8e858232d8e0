use std::collections::BTreeMap;

use serde::Serialize;

use crate::registry::{ModuleDescriptor, RegistrySnapshot};

/// Status of one discovered module.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleStatus {
    pub name: String,
    pub version: String,
    pub developer: String,
    pub enabled: bool,
    pub loaded: bool,
    pub route_prefix: String,
    pub mock_enabled: bool,
}

impl ModuleStatus {
    pub fn new(descriptor: &ModuleDescriptor, loaded: bool) -> Self {
        Self {
            name: descriptor.display_name.clone(),
            version: descriptor.version.clone(),
            developer: descriptor.developer.clone(),
            enabled: descriptor.enabled,
            loaded,
            route_prefix: descriptor.route_prefix.clone(),
            mock_enabled: descriptor.mock.enabled,
        }
    }
}

/// Registry-wide summary, keyed by module directory name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RegistryStatus {
    pub total_modules: usize,
    pub loaded_modules: usize,
    pub modules: BTreeMap<String, ModuleStatus>,
}

impl From<&RegistrySnapshot> for RegistryStatus {
    fn from(snapshot: &RegistrySnapshot) -> Self {
        let modules: BTreeMap<String, ModuleStatus> = snapshot
            .descriptors()
            .iter()
            .map(|d| (d.name.clone(), ModuleStatus::new(d, snapshot.is_loaded(&d.name))))
            .collect();
        Self {
            total_modules: modules.len(),
            loaded_modules: snapshot.loaded().len(),
            modules,
        }
    }
}
