//! Per-module descriptor files (`config/module.toml`).

use std::collections::BTreeMap;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::registry::RegistryError;

pub const DESCRIPTOR_FILE: &str = "config/module.toml";

fn default_true() -> bool {
    true
}

fn default_cache_duration() -> u64 {
    300
}

/// The `[mock]` table of a descriptor.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MockSettings {
    #[serde(default = "default_true")]
    pub enabled: bool,
    #[serde(default, alias = "fallbackToReal")]
    pub fallback_to_real: bool,
    #[serde(default = "default_cache_duration", alias = "cacheDurationSeconds")]
    pub cache_duration_seconds: u64,
}

impl Default for MockSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            fallback_to_real: false,
            cache_duration_seconds: default_cache_duration(),
        }
    }
}

/// Metadata for one module directory.
///
/// `name` is the directory name and is the registry key; the `name` written in the file
/// is the human-facing [`display_name`](Self::display_name).
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ModuleDescriptor {
    #[serde(skip)]
    pub name: String,
    #[serde(rename = "name", default)]
    pub display_name: String,
    #[serde(default)]
    pub developer: String,
    #[serde(default)]
    pub version: String,
    #[serde(default)]
    pub enabled: bool,
    #[serde(default)]
    pub endpoints: BTreeMap<String, String>,
    #[serde(default)]
    pub mock: MockSettings,
    #[serde(default, alias = "mockData")]
    pub mock_data: Option<String>,
    #[serde(default, alias = "routePrefix")]
    pub route_prefix: String,
    #[serde(skip)]
    pub path: PathBuf,
}

impl ModuleDescriptor {
    /// Reads `<dir>/config/module.toml`.
    ///
    /// `Ok(None)` when the file does not exist: the directory is simply not a module.
    pub fn load(dir: &Path) -> Result<Option<Self>, RegistryError> {
        let file = dir.join(DESCRIPTOR_FILE);
        let raw = match std::fs::read_to_string(&file) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(RegistryError::Io { path: file, source }),
        };

        let name = dir
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        Self::parse(&name, dir, &raw)
            .map(Some)
            .map_err(|source| RegistryError::Toml { path: file, source })
    }

    pub fn parse(name: &str, dir: &Path, raw: &str) -> Result<Self, toml::de::Error> {
        let mut descriptor: Self = toml::from_str(raw)?;
        descriptor.name = name.to_string();
        descriptor.path = dir.to_path_buf();
        descriptor.route_prefix = normalize_prefix(&descriptor.route_prefix, name);
        if descriptor.display_name.is_empty() {
            descriptor.display_name = name.to_string();
        }
        Ok(descriptor)
    }
}

fn normalize_prefix(raw: &str, name: &str) -> String {
    let trimmed = raw.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        format!("/api/{}", name)
    } else if trimmed.starts_with('/') {
        trimmed.to_string()
    } else {
        format!("/{}", trimmed)
    }
}
