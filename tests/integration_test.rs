use std::path::PathBuf;

use module_hub::clients::{DataClient, ProductClient, UserClient};
use module_hub::config::HubConfig;
use module_hub::framework::{DataFacade, Filters, FixtureSource, RecordId};
use module_hub::lifecycle::HubSystem;
use module_hub::model::{Product, User};
use module_hub::proxy::Domain;
use serde_json::{json, Map, Value};

fn demos() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("demos")
}

fn demo_config() -> HubConfig {
    HubConfig {
        base_path: demos(),
        ..HubConfig::default()
    }
}

fn input(value: Value) -> Map<String, Value> {
    value.as_object().cloned().unwrap_or_default()
}

/// Full end-to-end run over the demo module tree and fixtures.
#[tokio::test]
async fn test_demo_system_end_to_end() {
    let system = HubSystem::start(demo_config()).await.expect("Failed to start hub");

    let status = system.registry.status();
    assert_eq!(status.total_modules, 3);
    assert_eq!(status.loaded_modules, 3);
    assert_eq!(status.modules["module-b"].name, "Product Management");

    let user = system
        .dispatcher
        .dispatch(Domain::User, "user", Some("3"), &Map::new())
        .await;
    assert!(user.success);
    assert_eq!(user.data.unwrap()["name"], json!("Wang Wu"));

    let low = system
        .dispatcher
        .dispatch(Domain::Product, "check-stock", Some("2"), &input(json!({"quantity": 10})))
        .await;
    assert_eq!(low.data.unwrap()["available"], json!(false));

    let paid = system
        .dispatcher
        .dispatch(Domain::Order, "pay", Some("7"), &Map::new())
        .await;
    let data = paid.data.unwrap();
    assert_eq!(data["id"], json!(7));
    assert_eq!(data["status"], json!("paid"));

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_stock_check_quantity_notation() {
    let system = HubSystem::start(demo_config()).await.expect("Failed to start hub");
    let check = |quantity: Value| {
        let dispatcher = system.dispatcher.clone();
        async move {
            dispatcher
                .dispatch(Domain::Product, "check-stock", Some("2"), &input(json!({ "quantity": quantity })))
                .await
        }
    };

    // Product 2 has 5 in stock.
    for whole in [json!(10.0), json!(1e2), json!("10.0"), json!(" 10 ")] {
        let envelope = check(whole.clone()).await;
        assert!(envelope.success, "{whole}: {envelope:?}");
        let data = envelope.data.unwrap();
        assert_eq!(data["available"], json!(false), "{whole}");
    }
    let exact = check(json!(5.0)).await.data.unwrap();
    assert_eq!(exact["quantity"], json!(5));
    assert_eq!(exact["available"], json!(true));

    for bad in [json!(2.5), json!("abc"), json!(-1), json!(true)] {
        let envelope = check(bad.clone()).await;
        assert!(!envelope.success, "{bad}");
        assert_eq!(envelope.message, "invalid quantity");
        assert_eq!(envelope.code, Some(400));
    }

    system.shutdown().await.expect("Failed to shut down");
}

#[tokio::test]
async fn test_demo_routes_dispatch_through_snapshot() {
    let system = HubSystem::start(demo_config()).await.unwrap();

    let order = system
        .dispatcher
        .dispatch_route("GET", "/api/module-c/orders/7", &Map::new())
        .await;
    assert!(order.success);
    assert_eq!(order.data.unwrap()["order_no"], json!("ORD202401070007"));

    let search = system
        .dispatcher
        .dispatch_route("GET", "/api/module-a/users/search", &input(json!({"keyword": "li"})))
        .await;
    assert_eq!(search.data.unwrap().as_array().unwrap().len(), 1);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_product_fixture_queries() {
    let products = ProductClient::new(DataFacade::mock(FixtureSource::<Product>::load(
        demos().join("data/mock/products.json"),
    )));

    assert!(!products.check_stock(RecordId(2), 10).await);
    assert!(products.check_stock(RecordId(1), 50).await);
    assert!(!products.check_stock(RecordId(404), 1).await);

    let mid_range = products
        .list(&Filters::new().min("price", 5000).max("price", 10000))
        .await;
    let ids: Vec<u64> = mid_range.iter().map(|p| p.id.0).collect();
    assert_eq!(ids, vec![1, 4]);

    let phones = products
        .list(&Filters::new().exact("category", "phone").min("stock", "50"))
        .await;
    assert_eq!(phones.len(), 1);
    assert_eq!(phones[0].name, "iPhone 15");

    assert_eq!(products.search("").await.len(), 4);
    assert_eq!(products.search("APPLE").await.len(), 2);
}

#[tokio::test]
async fn test_string_and_numeric_ids_resolve_alike() {
    let users = UserClient::new(DataFacade::mock(FixtureSource::<User>::load(
        demos().join("data/mock/users.json"),
    )));
    assert!(users.exists(RecordId(3)).await);
    assert!(users.exists("3".parse().unwrap()).await);
    assert_eq!(users.list(&Filters::new().exact("age", "35")).await.len(), 1);
}

#[tokio::test]
async fn test_real_mode_is_empty_without_a_provider() {
    let config = HubConfig {
        is_mock: false,
        ..demo_config()
    };
    let system = HubSystem::start(config).await.unwrap();
    assert!(!system.dispatcher.mode().is_mock());

    let missing = system
        .dispatcher
        .dispatch(Domain::Order, "order", Some("7"), &Map::new())
        .await;
    assert_eq!(missing.message, "order not found");

    let listed = system
        .dispatcher
        .dispatch(Domain::User, "users", None, &Map::new())
        .await;
    assert_eq!(listed.data.unwrap(), json!([]));

    system.shutdown().await.unwrap();
}
