//! # HTTP Surface
//!
//! axum router over the registry and the dispatcher. Module routes are not mounted on
//! the router: the fallback handler resolves them against the current registry snapshot,
//! so a reload changes routing without rebuilding anything.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::{PathRejection, QueryRejection};
use axum::extract::{Extension, Path, Query};
use axum::http::{Method, Uri};
use axum::response::Json;
use axum::routing::{any, get, post};
use axum::Router;
use serde::Deserialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::proxy::{Dispatcher, Domain, Envelope};
use crate::registry::RegistryClient;

/// Shared handler state.
#[derive(Clone)]
pub struct HubState {
    pub dispatcher: Arc<Dispatcher>,
    pub registry: RegistryClient,
}

pub fn router(state: HubState) -> Router {
    Router::new()
        .route("/api/modules", get(list_modules))
        .route("/api/modules/reload", post(reload_modules))
        .route("/api/modules/{name}", get(module_status))
        .route("/api/proxy/modules", get(proxy_modules))
        .route("/api/proxy/{domain}/{action}", any(proxy))
        .route("/api/proxy/{domain}/{action}/{id}", any(proxy))
        .route("/healthz", get(healthz))
        .fallback(module_route)
        .layer(Extension(state))
}

#[derive(Debug, Deserialize)]
struct ProxyPath {
    domain: String,
    action: String,
    id: Option<String>,
}

async fn list_modules(Extension(state): Extension<HubState>) -> Envelope {
    Envelope::success("Module status", to_data(&state.registry.status()))
}

async fn module_status(
    Extension(state): Extension<HubState>,
    Path(name): Path<String>,
) -> Envelope {
    match state.registry.module(&name) {
        Some(module) => Envelope::success("Module status", json!({ "module": module })),
        None => Envelope::error("module not found", 404),
    }
}

async fn reload_modules(Extension(state): Extension<HubState>) -> Envelope {
    match state.registry.reload().await {
        Ok(status) => Envelope::success("Modules reloaded", to_data(&status)),
        Err(e) => {
            warn!(error = %e, "Reload failed");
            Envelope::error(e.to_string(), 500)
        }
    }
}

async fn proxy_modules(Extension(state): Extension<HubState>) -> Envelope {
    state.dispatcher.modules_overview()
}

async fn proxy(
    Extension(state): Extension<HubState>,
    path: Result<Path<ProxyPath>, PathRejection>,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> Envelope {
    let path = match path {
        Ok(Path(path)) => path,
        Err(e) => return rejected(e.status().as_u16(), &e.body_text()),
    };
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => return rejected(e.status().as_u16(), &e.body_text()),
    };
    let domain: Domain = match path.domain.parse() {
        Ok(domain) => domain,
        Err(e) => return e.into(),
    };
    let input = merge_input(query, &body);
    state
        .dispatcher
        .dispatch(domain, &path.action, path.id.as_deref(), &input)
        .await
}

async fn module_route(
    Extension(state): Extension<HubState>,
    method: Method,
    uri: Uri,
    query: Result<Query<HashMap<String, String>>, QueryRejection>,
    body: Bytes,
) -> Envelope {
    let query = match query {
        Ok(Query(query)) => query,
        Err(e) => return rejected(e.status().as_u16(), &e.body_text()),
    };
    let input = merge_input(query, &body);
    state
        .dispatcher
        .dispatch_route(method.as_str(), uri.path(), &input)
        .await
}

/// Extractor failures answer with an error envelope like every other response.
fn rejected(code: u16, reason: &str) -> Envelope {
    debug!(code, reason, "Request rejected");
    Envelope::error(reason, code)
}

async fn healthz() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

/// Query parameters overlaid with the fields of a JSON object body.
fn merge_input(query: HashMap<String, String>, body: &[u8]) -> Map<String, Value> {
    let mut input: Map<String, Value> = query
        .into_iter()
        .map(|(key, value)| (key, Value::String(value)))
        .collect();

    if body.iter().all(u8::is_ascii_whitespace) {
        return input;
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(fields)) => input.extend(fields),
        Ok(_) => debug!("Ignoring non-object body"),
        Err(e) => debug!(error = %e, "Ignoring unparseable body"),
    }
    input
}

fn to_data<T: serde::Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}
