use std::collections::BTreeSet;

use crate::registry::{ModuleDescriptor, RouteMatch, RouteRegistration};

/// Immutable view of the registry produced by one scan pass.
///
/// `loaded` is always a subset of the descriptor names.
#[derive(Debug, Clone, Default)]
pub struct RegistrySnapshot {
    descriptors: Vec<ModuleDescriptor>,
    loaded: BTreeSet<String>,
    routes: Vec<RouteRegistration>,
    generation: u64,
}

impl RegistrySnapshot {
    pub(crate) fn new(generation: u64) -> Self {
        Self {
            generation,
            ..Self::default()
        }
    }

    /// Records `descriptor`, replacing an earlier one with the same name.
    pub(crate) fn insert_descriptor(&mut self, descriptor: ModuleDescriptor) {
        match self.descriptors.iter_mut().find(|d| d.name == descriptor.name) {
            Some(existing) => *existing = descriptor,
            None => self.descriptors.push(descriptor),
        }
    }

    /// Marks `module` loaded and swaps in its routes.
    pub(crate) fn mark_loaded(&mut self, module: &str, routes: Vec<RouteRegistration>) {
        self.routes.retain(|r| r.module != module);
        self.routes.extend(routes);
        self.loaded.insert(module.to_string());
    }

    pub fn descriptors(&self) -> &[ModuleDescriptor] {
        &self.descriptors
    }

    pub fn descriptor(&self, name: &str) -> Option<&ModuleDescriptor> {
        self.descriptors.iter().find(|d| d.name == name)
    }

    /// Enabled means present: only enabled descriptors make it into a snapshot.
    pub fn is_enabled(&self, name: &str) -> bool {
        self.descriptor(name).is_some_and(|d| d.enabled)
    }

    pub fn is_loaded(&self, name: &str) -> bool {
        self.loaded.contains(name)
    }

    pub fn loaded(&self) -> &BTreeSet<String> {
        &self.loaded
    }

    pub fn routes(&self) -> &[RouteRegistration] {
        &self.routes
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// First published route matching the request.
    pub fn route_for(&self, method: &str, path: &str) -> Option<RouteMatch<'_>> {
        self.routes.iter().find_map(|route| route.matches(method, path))
    }
}
