//! Hub configuration.
//!
//! Layers, later ones winning:
//!
//! 1. built-in defaults
//! 2. `hub.toml` in the working directory (optional)
//! 3. `HUB_*` environment variables (`HUB_BINDINGS__USER=module-x` for nested keys)
//! 4. the bare `IS_MOCK` variable
//!
//! The configuration is read once at startup. The mock flag is not hot-reloadable.

use std::path::{Path, PathBuf};

use figment::providers::{Env, Format, Serialized, Toml};
use figment::Figment;
use serde::{Deserialize, Deserializer, Serialize};

use crate::proxy::Domain;

pub const CONFIG_FILE: &str = "hub.toml";

/// Which module directory serves each domain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainBindings {
    pub user: String,
    pub product: String,
    pub order: String,
}

impl Default for DomainBindings {
    fn default() -> Self {
        Self {
            user: "module-a".to_string(),
            product: "module-b".to_string(),
            order: "module-c".to_string(),
        }
    }
}

impl DomainBindings {
    pub fn module_for(&self, domain: Domain) -> &str {
        match domain {
            Domain::User => &self.user,
            Domain::Product => &self.product,
            Domain::Order => &self.order,
        }
    }

    /// Reverse lookup, used when a request arrives through a module's own route.
    pub fn domain_for(&self, module: &str) -> Option<Domain> {
        [Domain::User, Domain::Product, Domain::Order]
            .into_iter()
            .find(|domain| self.module_for(*domain) == module)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HubConfig {
    pub bind_addr: String,
    /// Base directory that relative `modules_dir` and `fixtures_dir` resolve against.
    pub base_path: PathBuf,
    pub modules_dir: PathBuf,
    pub fixtures_dir: PathBuf,
    #[serde(deserialize_with = "flag")]
    pub is_mock: bool,
    pub environment: String,
    pub bindings: DomainBindings,
}

impl Default for HubConfig {
    fn default() -> Self {
        Self {
            bind_addr: "127.0.0.1:9501".to_string(),
            base_path: PathBuf::from("."),
            modules_dir: PathBuf::from("modules"),
            fixtures_dir: PathBuf::from("data/mock"),
            is_mock: true,
            environment: "development".to_string(),
            bindings: DomainBindings::default(),
        }
    }
}

impl HubConfig {
    /// The full layer stack, reading `file` as the TOML layer.
    pub fn figment(file: impl AsRef<Path>) -> Figment {
        Figment::from(Serialized::defaults(HubConfig::default()))
            .merge(Toml::file(file.as_ref()))
            .merge(Env::prefixed("HUB_").split("__"))
            .merge(Env::raw().only(&["IS_MOCK"]))
    }

    pub fn from_figment(figment: &Figment) -> Result<Self, figment::Error> {
        let config: HubConfig = figment.extract()?;
        if config.bind_addr.trim().is_empty() {
            return Err(figment::Error::from("bind_addr must be set".to_string()));
        }
        Ok(config)
    }

    pub fn load() -> Result<Self, figment::Error> {
        Self::from_figment(&Self::figment(CONFIG_FILE))
    }

    pub fn modules_root(&self) -> PathBuf {
        self.base_path.join(&self.modules_dir)
    }

    pub fn fixtures_root(&self) -> PathBuf {
        self.base_path.join(&self.fixtures_dir)
    }
}

/// Accepts `true`/`false`, `1`/`0` and the strings `yes`/`no`/`on`/`off`.
fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Bool(bool),
        Int(i64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Bool(value) => Ok(value),
        Raw::Int(value) => Ok(value != 0),
        Raw::Text(text) => match text.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" | "" => Ok(false),
            other => Err(serde::de::Error::custom(format!("invalid flag {:?}", other))),
        },
    }
}
