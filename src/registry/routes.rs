//! Module route files (`routes/routes.toml`) and request matching.
//!
//! Activation turns a routes file into a list of [`RouteRegistration`]s that the registry
//! publishes as data. The HTTP layer matches incoming requests against the published
//! list, so no global router is mutated.

use std::io::ErrorKind;

use serde::{Deserialize, Serialize};

use crate::registry::{ModuleDescriptor, RegistryError};

pub const ROUTES_FILE: &str = "routes/routes.toml";

#[derive(Debug, Deserialize)]
struct RoutesFile {
    #[serde(default)]
    routes: Vec<RouteEntry>,
}

#[derive(Debug, Deserialize)]
struct RouteEntry {
    #[serde(default = "default_method")]
    method: String,
    #[serde(default)]
    path: String,
    action: String,
}

fn default_method() -> String {
    "GET".to_string()
}

/// One route a module contributes, with its path already joined to the module prefix.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RouteRegistration {
    pub module: String,
    pub method: String,
    pub path: String,
    pub action: String,
}

/// A successful match; `id` is the value captured by a `{...}` segment, if any.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteMatch<'a> {
    pub route: &'a RouteRegistration,
    pub id: Option<String>,
}

impl RouteRegistration {
    /// Matches a request. `ANY` accepts every method; a template segment in braces
    /// matches any single non-empty segment.
    pub fn matches(&self, method: &str, path: &str) -> Option<RouteMatch<'_>> {
        if self.method != "ANY" && !self.method.eq_ignore_ascii_case(method) {
            return None;
        }

        let template: Vec<&str> = segments(&self.path).collect();
        let actual: Vec<&str> = segments(path).collect();
        if template.len() != actual.len() {
            return None;
        }

        let mut id = None;
        for (expected, got) in template.iter().zip(&actual) {
            if expected.starts_with('{') && expected.ends_with('}') {
                id = Some(got.to_string());
            } else if expected != got {
                return None;
            }
        }
        Some(RouteMatch { route: self, id })
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    path.split('/').filter(|s| !s.is_empty())
}

fn join(prefix: &str, path: &str) -> String {
    let path = path.trim().trim_matches('/');
    if path.is_empty() {
        prefix.to_string()
    } else {
        format!("{}/{}", prefix, path)
    }
}

/// Reads the routes file of `descriptor`'s module.
///
/// `Ok(None)` when the module has no routes file.
pub fn load_routes(
    descriptor: &ModuleDescriptor,
) -> Result<Option<Vec<RouteRegistration>>, RegistryError> {
    let file = descriptor.path.join(ROUTES_FILE);
    let raw = match std::fs::read_to_string(&file) {
        Ok(raw) => raw,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(source) => return Err(RegistryError::Io { path: file, source }),
    };
    parse_routes(descriptor, &raw)
        .map(Some)
        .map_err(|source| RegistryError::Toml { path: file, source })
}

pub fn parse_routes(
    descriptor: &ModuleDescriptor,
    raw: &str,
) -> Result<Vec<RouteRegistration>, toml::de::Error> {
    let file: RoutesFile = toml::from_str(raw)?;
    Ok(file
        .routes
        .into_iter()
        .map(|entry| RouteRegistration {
            module: descriptor.name.clone(),
            method: entry.method.trim().to_ascii_uppercase(),
            path: join(&descriptor.route_prefix, &entry.path),
            action: entry.action,
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::path::Path;

    use super::*;

    fn descriptor() -> ModuleDescriptor {
        ModuleDescriptor::parse("module-c", Path::new("/m/module-c"), "enabled = true").unwrap()
    }

    fn routes() -> Vec<RouteRegistration> {
        let raw = r#"
            [[routes]]
            method = "get"
            path = "/orders"
            action = "orders"

            [[routes]]
            method = "POST"
            path = "order/{id}/pay"
            action = "pay-order"

            [[routes]]
            method = "ANY"
            path = "/"
            action = "info"
        "#;
        parse_routes(&descriptor(), raw).unwrap()
    }

    #[test]
    fn test_paths_are_joined_to_the_prefix() {
        let routes = routes();
        assert_eq!(routes[0].path, "/api/module-c/orders");
        assert_eq!(routes[0].method, "GET");
        assert_eq!(routes[1].path, "/api/module-c/order/{id}/pay");
        assert_eq!(routes[2].path, "/api/module-c");
        assert!(routes.iter().all(|r| r.module == "module-c"));
    }

    #[test]
    fn test_id_segment_is_captured() {
        let routes = routes();
        let found = routes[1].matches("POST", "/api/module-c/order/7/pay").unwrap();
        assert_eq!(found.id.as_deref(), Some("7"));
        assert_eq!(found.route.action, "pay-order");

        let plain = routes[0].matches("GET", "/api/module-c/orders/").unwrap();
        assert_eq!(plain.id, None);
    }

    #[test]
    fn test_non_matching_requests() {
        let routes = routes();
        assert!(routes[1].matches("GET", "/api/module-c/order/7/pay").is_none());
        assert!(routes[1].matches("POST", "/api/module-c/order/7").is_none());
        assert!(routes[0].matches("GET", "/api/module-b/orders").is_none());
        assert!(routes[2].matches("DELETE", "/api/module-c").is_some());
    }

    #[test]
    fn test_missing_routes_file() {
        let dir = tempfile::tempdir().unwrap();
        let descriptor = ModuleDescriptor::parse("m", dir.path(), "").unwrap();
        assert!(load_routes(&descriptor).unwrap().is_none());
    }
}
