use std::sync::Arc;

use axum::Router;
use tracing::{error, info};

use crate::clients::{OrderClient, ProductClient, UserClient};
use crate::config::HubConfig;
use crate::framework::{DataFacade, DataMode, FixtureSource, FrameworkError, NoopProvider, Record};
use crate::proxy::{DataClients, Dispatcher};
use crate::registry::{ModuleRegistry, RegistryActor, RegistryClient, RegistrySnapshot};
use crate::web::{self, HubState};

/// The runtime orchestrator for the hub.
///
/// `HubSystem` is responsible for:
/// - **Startup**: bootstrapping the registry and loading fixtures on the blocking pool
/// - **Wiring**: building one facade per domain and handing them to the [`Dispatcher`]
/// - **Lifecycle**: running the registry actor and stopping it on shutdown
///
/// # Example
///
/// ```ignore
/// let system = HubSystem::start(HubConfig::load()?).await?;
/// axum::serve(listener, system.router()).await?;
/// system.shutdown().await?;
/// ```
pub struct HubSystem {
    pub registry: RegistryClient,
    pub dispatcher: Arc<Dispatcher>,
    config: HubConfig,
    handles: Vec<tokio::task::JoinHandle<()>>,
}

impl HubSystem {
    /// Bootstraps the registry, builds the data clients and starts the registry actor.
    ///
    /// The mock/real decision is taken here, once, from `config.is_mock`.
    pub async fn start(config: HubConfig) -> Result<Self, FrameworkError> {
        let mode = DataMode::from_flag(config.is_mock);
        let registry = Arc::new(ModuleRegistry::new(config.modules_root()));

        let boot_registry = registry.clone();
        let boot_config = config.clone();
        let clients = tokio::task::spawn_blocking(move || {
            boot_registry.bootstrap();
            let snapshot = boot_registry.snapshot();
            let bindings = &boot_config.bindings;
            DataClients {
                users: UserClient::new(facade(mode, &boot_config, &snapshot, &bindings.user)),
                products: ProductClient::new(facade(
                    mode,
                    &boot_config,
                    &snapshot,
                    &bindings.product,
                )),
                orders: OrderClient::new(facade(mode, &boot_config, &snapshot, &bindings.order)),
            }
        })
        .await
        .map_err(|e| FrameworkError::TaskFailed(e.to_string()))?;

        let (actor, registry_client) = RegistryActor::new(32, registry.clone());
        let handle = tokio::spawn(actor.run());

        let dispatcher = Dispatcher::new(registry, config.bindings.clone(), clients, mode)
            .with_environment(config.environment.clone());

        info!(mode = ?mode, environment = %config.environment, "Hub started");
        Ok(Self {
            registry: registry_client,
            dispatcher: Arc::new(dispatcher),
            config,
            handles: vec![handle],
        })
    }

    pub fn config(&self) -> &HubConfig {
        &self.config
    }

    /// The HTTP router over this system's registry and dispatcher.
    pub fn router(&self) -> Router {
        web::router(HubState {
            dispatcher: self.dispatcher.clone(),
            registry: self.registry.clone(),
        })
    }

    /// Drops the registry client, which closes the actor's channel, then waits for the
    /// actor task. Routers built from this system hold their own clients and must be
    /// dropped first.
    pub async fn shutdown(self) -> Result<(), FrameworkError> {
        info!("Shutting down hub...");
        drop(self.registry);
        drop(self.dispatcher);

        for handle in self.handles {
            if let Err(e) = handle.await {
                error!("Task failed: {:?}", e);
                return Err(FrameworkError::TaskFailed(e.to_string()));
            }
        }

        info!("Hub shutdown complete.");
        Ok(())
    }
}

/// Facade for one domain. Fixtures are only read in mock mode, from the bound module's
/// `mock_data` (relative to `base_path`) or else `<fixtures_dir>/<collection>.json`.
/// `fallback_to_real` also comes from the descriptor.
fn facade<T: Record>(
    mode: DataMode,
    config: &HubConfig,
    snapshot: &RegistrySnapshot,
    module: &str,
) -> DataFacade<T> {
    let descriptor = snapshot.descriptor(module);
    let fixtures = if mode.is_mock() {
        let path = match descriptor.and_then(|d| d.mock_data.as_deref()) {
            Some(mock_data) => config.base_path.join(mock_data),
            None => config.fixtures_root().join(format!("{}.json", T::COLLECTION)),
        };
        FixtureSource::load(path)
    } else {
        FixtureSource::empty()
    };
    let fallback = descriptor.is_some_and(|d| d.mock.fallback_to_real);
    DataFacade::new(mode, fixtures, Arc::new(NoopProvider)).with_fallback_to_real(fallback)
}
