use std::sync::Arc;

use chrono::Local;
use rand::Rng;
use serde::Serialize;
use serde_json::{json, Map, Value};
use tracing::{debug, warn};

use crate::clients::{DataClient, OrderClient, ProductClient, UserClient};
use crate::config::DomainBindings;
use crate::framework::{DataMode, Filters, Record, RecordId};
use crate::model::{Order, Product, User};
use crate::proxy::{DispatchError, Domain, Envelope, OrderAction, ProductAction, UserAction};
use crate::registry::{ModuleDescriptor, ModuleRegistry};

type Input = Map<String, Value>;

/// The three domain clients the dispatcher serves from.
#[derive(Clone)]
pub struct DataClients {
    pub users: UserClient,
    pub products: ProductClient,
    pub orders: OrderClient,
}

/// Routes requests to handlers, gated on module enablement.
///
/// Every call returns exactly one [`Envelope`]; failures never escape as errors.
#[derive(Clone)]
pub struct Dispatcher {
    registry: Arc<ModuleRegistry>,
    bindings: DomainBindings,
    clients: DataClients,
    mode: DataMode,
    environment: String,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<ModuleRegistry>,
        bindings: DomainBindings,
        clients: DataClients,
        mode: DataMode,
    ) -> Self {
        Self {
            registry,
            bindings,
            clients,
            mode,
            environment: "development".to_string(),
        }
    }

    pub fn with_environment(mut self, environment: impl Into<String>) -> Self {
        self.environment = environment.into();
        self
    }

    pub fn mode(&self) -> DataMode {
        self.mode
    }

    #[tracing::instrument(skip(self, domain, input), fields(domain = %domain))]
    pub async fn dispatch(
        &self,
        domain: Domain,
        action: &str,
        id: Option<&str>,
        input: &Input,
    ) -> Envelope {
        let module = self.bindings.module_for(domain);
        let snapshot = self.registry.snapshot();
        let Some(descriptor) = snapshot.descriptor(module).filter(|d| d.enabled) else {
            warn!(module, "Module not enabled");
            return DispatchError::ModuleDisabled(module.to_string()).into();
        };

        let result = match domain {
            Domain::User => {
                self.user(UserAction::from_name(action), id, input, descriptor)
                    .await
            }
            Domain::Product => {
                self.product(ProductAction::from_name(action), id, input, descriptor)
                    .await
            }
            Domain::Order => {
                self.order(OrderAction::from_name(action), id, input, descriptor)
                    .await
            }
        };

        result.unwrap_or_else(|e| {
            debug!(module, error = %e, "Dispatch failed");
            e.into()
        })
    }

    /// Resolves a request against the routes modules published and dispatches it to the
    /// domain bound to the owning module.
    pub async fn dispatch_route(&self, method: &str, path: &str, input: &Input) -> Envelope {
        let snapshot = self.registry.snapshot();
        let resolved = snapshot.route_for(method, path).and_then(|found| {
            self.bindings
                .domain_for(&found.route.module)
                .map(|domain| (domain, found))
        });
        let Some((domain, found)) = resolved else {
            return DispatchError::NoRoute {
                method: method.to_string(),
                path: path.to_string(),
            }
            .into();
        };

        debug!(module = %found.route.module, action = %found.route.action, "Route matched");
        self.dispatch(domain, &found.route.action, found.id.as_deref(), input)
            .await
    }

    /// Every enabled module with its metadata.
    pub fn modules_overview(&self) -> Envelope {
        let snapshot = self.registry.snapshot();
        let modules: Map<String, Value> = snapshot
            .descriptors()
            .iter()
            .map(|d| {
                let entry = json!({
                    "name": d.display_name,
                    "developer": d.developer,
                    "version": d.version,
                    "enabled": d.enabled,
                    "endpoints": d.endpoints,
                    "mock_mode": self.mode.is_mock(),
                });
                (d.name.clone(), entry)
            })
            .collect();
        let total = modules.len();

        Envelope::success(
            "All modules",
            json!({
                "modules": modules,
                "total": total,
                "mock_mode": self.mode.is_mock(),
                "environment": self.environment,
            }),
        )
    }

    fn module_info(&self, descriptor: &ModuleDescriptor) -> Envelope {
        Envelope::success(
            "Module info",
            json!({
                "module": descriptor.name,
                "name": descriptor.display_name,
                "developer": descriptor.developer,
                "version": descriptor.version,
                "enabled": descriptor.enabled,
                "mock_mode": self.mode.is_mock(),
                "endpoints": descriptor.endpoints,
            }),
        )
    }

    // =========================================================================
    // Per-domain handlers
    // =========================================================================

    async fn user(
        &self,
        action: UserAction,
        id: Option<&str>,
        input: &Input,
        descriptor: &ModuleDescriptor,
    ) -> Result<Envelope, DispatchError> {
        let users = &self.clients.users;
        let envelope = match action {
            UserAction::List => {
                let found = users.list(&Filters::from_json(input)).await;
                Envelope::success("User list", to_data(&found))
            }
            UserAction::Get => {
                let id = parse_id(id)?;
                let user = users
                    .get(id)
                    .await
                    .ok_or(DispatchError::NotFound(User::ENTITY))?;
                Envelope::success("User detail", to_data(&user))
            }
            UserAction::Search => {
                let found = users.search(&keyword(input)).await;
                Envelope::success("User search", to_data(&found))
            }
            UserAction::Create => Envelope::success(
                "User created",
                json!({
                    "id": synthetic_id(),
                    "name": input_or(input, "name", json!("")),
                    "email": input_or(input, "email", json!("")),
                    "created_at": now(),
                }),
            ),
            UserAction::Info => self.module_info(descriptor),
        };
        Ok(envelope)
    }

    async fn product(
        &self,
        action: ProductAction,
        id: Option<&str>,
        input: &Input,
        descriptor: &ModuleDescriptor,
    ) -> Result<Envelope, DispatchError> {
        let products = &self.clients.products;
        let envelope = match action {
            ProductAction::List => {
                let found = products.list(&Filters::from_json(input)).await;
                Envelope::success("Product list", to_data(&found))
            }
            ProductAction::Get => {
                let id = parse_id(id)?;
                let product = products
                    .get(id)
                    .await
                    .ok_or(DispatchError::NotFound(Product::ENTITY))?;
                Envelope::success("Product detail", to_data(&product))
            }
            ProductAction::Search => {
                let found = products.search(&keyword(input)).await;
                Envelope::success("Product search", to_data(&found))
            }
            ProductAction::CheckStock => {
                let id = parse_id(id)?;
                let quantity = quantity(input)?;
                let available = products.check_stock(id, quantity).await;
                Envelope::success(
                    "Stock checked",
                    json!({ "id": id, "quantity": quantity, "available": available }),
                )
            }
            ProductAction::Create => Envelope::success(
                "Product created",
                json!({
                    "id": synthetic_id(),
                    "name": input_or(input, "name", json!("")),
                    "price": input_or(input, "price", json!(0)),
                    "stock": input_or(input, "stock", json!(0)),
                    "created_at": now(),
                }),
            ),
            ProductAction::UpdateStock => {
                let id = parse_id(id)?;
                Envelope::success(
                    "Stock updated",
                    json!({
                        "id": id,
                        "stock": input_or(input, "stock", json!(0)),
                        "updated_at": now(),
                    }),
                )
            }
            ProductAction::Info => self.module_info(descriptor),
        };
        Ok(envelope)
    }

    async fn order(
        &self,
        action: OrderAction,
        id: Option<&str>,
        input: &Input,
        descriptor: &ModuleDescriptor,
    ) -> Result<Envelope, DispatchError> {
        let orders = &self.clients.orders;
        let envelope = match action {
            OrderAction::List => {
                let found = orders.list(&Filters::from_json(input)).await;
                Envelope::success("Order list", to_data(&found))
            }
            OrderAction::Get => {
                let id = parse_id(id)?;
                let order = orders
                    .get(id)
                    .await
                    .ok_or(DispatchError::NotFound(Order::ENTITY))?;
                Envelope::success("Order detail", to_data(&order))
            }
            OrderAction::Create => Envelope::success(
                "Order created",
                json!({
                    "id": synthetic_id(),
                    "order_no": order_no(),
                    "user_id": input_or(input, "user_id", json!(0)),
                    "product_id": input_or(input, "product_id", json!(0)),
                    "amount": input_or(input, "amount", json!(0)),
                    "status": "pending",
                    "created_at": now(),
                }),
            ),
            OrderAction::Pay => {
                let id = parse_id(id)?;
                Envelope::success(
                    "Order paid",
                    json!({ "id": id, "status": "paid", "payment_time": now() }),
                )
            }
            OrderAction::Cancel => {
                let id = parse_id(id)?;
                Envelope::success(
                    "Order cancelled",
                    json!({ "id": id, "status": "cancelled", "cancelled_at": now() }),
                )
            }
            OrderAction::Info => self.module_info(descriptor),
        };
        Ok(envelope)
    }
}

fn parse_id(id: Option<&str>) -> Result<RecordId, DispatchError> {
    id.ok_or(DispatchError::InvalidId)?
        .parse()
        .map_err(|_| DispatchError::InvalidId)
}

fn to_data<T: Serialize>(value: &T) -> Value {
    serde_json::to_value(value).unwrap_or(Value::Null)
}

fn input_or(input: &Input, key: &str, default: Value) -> Value {
    input.get(key).cloned().unwrap_or(default)
}

fn keyword(input: &Input) -> String {
    match input.get("keyword").or_else(|| input.get("q")) {
        Some(Value::String(s)) => s.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

/// Requested quantity for a stock check; 1 when absent or empty.
///
/// Numbers and numeric strings are accepted in any notation (`10`, `10.0`, `"1e2"`) as
/// long as they denote a non-negative whole number.
fn quantity(input: &Input) -> Result<i64, DispatchError> {
    let raw = match input.get("quantity") {
        None | Some(Value::Null) => return Ok(1),
        Some(Value::String(s)) if s.trim().is_empty() => return Ok(1),
        Some(Value::Number(n)) => n.as_f64(),
        Some(Value::String(s)) => s.trim().parse::<f64>().ok(),
        Some(_) => None,
    };
    match raw {
        Some(q) if q.is_finite() && q.fract() == 0.0 && q >= 0.0 && q <= i64::MAX as f64 => {
            Ok(q as i64)
        }
        _ => Err(DispatchError::InvalidQuantity),
    }
}

fn now() -> String {
    Local::now().format("%Y-%m-%d %H:%M:%S").to_string()
}

fn synthetic_id() -> u32 {
    rand::rng().random_range(100..1000)
}

fn order_no() -> String {
    let suffix: u32 = rand::rng().random_range(1000..10000);
    format!("ORD{}{}", Local::now().format("%Y%m%d%H%M%S"), suffix)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::MockProvider;
    use crate::framework::{DataFacade, FixtureSource};
    use crate::registry::tests::write_module;

    const ENABLED: &str = "enabled = true\nname = \"Module\"\nversion = \"1.0.0\"\ndeveloper = \"dev\"";

    struct Fixture {
        _root: tempfile::TempDir,
        dispatcher: Dispatcher,
        products: MockProvider<Product>,
    }

    /// module-a and module-c enabled, module-b disabled. Products are served by a real-mode
    /// mock provider so a test can prove the product domain was never queried.
    fn fixture() -> Fixture {
        let root = tempfile::tempdir().unwrap();
        write_module(root.path(), "module-a", Some(ENABLED), Some("routes = []"));
        write_module(root.path(), "module-b", Some("enabled = false"), None);
        write_module(root.path(), "module-c", Some(ENABLED), Some("routes = []"));
        let registry = Arc::new(ModuleRegistry::new(root.path()));
        registry.reload();

        let products = MockProvider::<Product>::new();
        let clients = DataClients {
            users: UserClient::new(DataFacade::mock(FixtureSource::from_records(vec![
                User::new(1u64, "Alice", "alice@example.com").with_status("active"),
                User::new(2u64, "Bob", "bob@example.com").with_status("inactive"),
            ]))),
            products: ProductClient::new(DataFacade::new(
                DataMode::Real,
                FixtureSource::empty(),
                products.provider(),
            )),
            orders: OrderClient::new(DataFacade::mock(FixtureSource::from_records(vec![
                Order::new(7u64, 1u64, 1u64, 5999.0),
            ]))),
        };

        let dispatcher = Dispatcher::new(registry, DomainBindings::default(), clients, DataMode::Mock)
            .with_environment("test");
        Fixture {
            _root: root,
            dispatcher,
            products,
        }
    }

    fn input(value: Value) -> Input {
        value.as_object().cloned().unwrap_or_default()
    }

    #[tokio::test]
    async fn test_disabled_domain_never_reaches_a_handler() {
        let f = fixture();
        for action in ["products", "product", "check-stock", "anything"] {
            let envelope = f
                .dispatcher
                .dispatch(Domain::Product, action, Some("1"), &Input::new())
                .await;
            assert!(!envelope.success);
            assert_eq!(envelope.message, "module-b is not enabled");
            assert_eq!(envelope.code, Some(400));
        }
        f.products.verify();
    }

    #[tokio::test]
    async fn test_pay_order() {
        let f = fixture();
        let envelope = f
            .dispatcher
            .dispatch(Domain::Order, "pay-order", Some("7"), &Input::new())
            .await;
        assert!(envelope.success);
        let data = envelope.data.unwrap();
        assert_eq!(data["id"], json!(7));
        assert_eq!(data["status"], json!("paid"));
        assert!(data["payment_time"].is_string());
    }

    #[tokio::test]
    async fn test_invalid_and_unknown_ids() {
        let f = fixture();
        for id in [None, Some("abc"), Some("")] {
            let envelope = f.dispatcher.dispatch(Domain::Order, "cancel", id, &Input::new()).await;
            assert_eq!(envelope.message, "invalid id");
            assert_eq!(envelope.code, Some(400));
        }

        let missing = f.dispatcher.dispatch(Domain::Order, "order", Some("99"), &Input::new()).await;
        assert!(!missing.success);
        assert_eq!(missing.message, "order not found");
        assert_eq!(missing.code, Some(400));

        let found = f.dispatcher.dispatch(Domain::User, "user", Some(" 2 "), &Input::new()).await;
        assert_eq!(found.data.unwrap()["name"], json!("Bob"));
    }

    #[tokio::test]
    async fn test_list_and_search_use_input() {
        let f = fixture();
        let active = f
            .dispatcher
            .dispatch(Domain::User, "users", None, &input(json!({"status": "active"})))
            .await;
        assert_eq!(active.data.unwrap().as_array().unwrap().len(), 1);

        let searched = f
            .dispatcher
            .dispatch(Domain::User, "search", None, &input(json!({"keyword": "BOB@"})))
            .await;
        let data = searched.data.unwrap();
        assert_eq!(data.as_array().unwrap().len(), 1);
        assert_eq!(data[0]["id"], json!(2));
    }

    #[tokio::test]
    async fn test_create_order_synthesises_fields() {
        let f = fixture();
        let envelope = f
            .dispatcher
            .dispatch(
                Domain::Order,
                "create",
                None,
                &input(json!({"user_id": 1, "product_id": 2, "amount": 99.5})),
            )
            .await;
        let data = envelope.data.unwrap();
        let id = data["id"].as_u64().unwrap();
        assert!((100..1000).contains(&id));
        let order_no = data["order_no"].as_str().unwrap();
        assert!(order_no.starts_with("ORD"));
        assert_eq!(order_no.len(), 3 + 14 + 4);
        assert_eq!(data["status"], json!("pending"));
        assert_eq!(data["amount"], json!(99.5));
        assert_eq!(data["created_at"].as_str().unwrap().len(), 19);
    }

    #[tokio::test]
    async fn test_unknown_action_returns_module_info() {
        let f = fixture();
        let envelope = f.dispatcher.dispatch(Domain::User, "index", None, &Input::new()).await;
        let data = envelope.data.unwrap();
        assert_eq!(data["module"], json!("module-a"));
        assert_eq!(data["name"], json!("Module"));
        assert_eq!(data["mock_mode"], json!(true));
    }

    #[tokio::test]
    async fn test_modules_overview_lists_enabled_modules() {
        let f = fixture();
        let data = f.dispatcher.modules_overview().data.unwrap();
        assert_eq!(data["total"], json!(2));
        assert!(data["modules"].get("module-b").is_none());
        assert_eq!(data["environment"], json!("test"));
    }

    #[tokio::test]
    async fn test_unmatched_route() {
        let f = fixture();
        let envelope = f
            .dispatcher
            .dispatch_route("GET", "/api/module-a/nothing", &Input::new())
            .await;
        assert_eq!(envelope.code, Some(404));
    }

    #[test]
    fn test_quantity_defaults_and_rejections() {
        assert_eq!(quantity(&Input::new()), Ok(1));
        assert_eq!(quantity(&input(json!({"quantity": null}))), Ok(1));
        assert_eq!(quantity(&input(json!({"quantity": ""}))), Ok(1));
        assert_eq!(quantity(&input(json!({"quantity": 10.0}))), Ok(10));
        assert_eq!(quantity(&input(json!({"quantity": "1e2"}))), Ok(100));
        assert_eq!(
            quantity(&input(json!({"quantity": 0.5}))),
            Err(DispatchError::InvalidQuantity)
        );
        assert_eq!(
            quantity(&input(json!({"quantity": "NaN"}))),
            Err(DispatchError::InvalidQuantity)
        );
    }
}
