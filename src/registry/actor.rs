//! Actor that owns the write side of the registry.
//!
//! Reload requests arrive over an `mpsc` channel and are answered over a `oneshot`, so
//! concurrent reload calls never interleave. Reads bypass the actor and load the
//! published snapshot directly.

use std::sync::Arc;

use tokio::sync::{mpsc, oneshot};
use tracing::{debug, info, warn};

use crate::framework::FrameworkError;
use crate::registry::{ModuleRegistry, ModuleStatus, RegistrySnapshot, RegistryStatus};

/// Type alias for the one-shot response channel used by the actor.
pub type Response<T> = oneshot::Sender<Result<T, FrameworkError>>;

#[derive(Debug)]
pub enum RegistryRequest {
    Reload { respond_to: Response<RegistryStatus> },
}

pub struct RegistryActor {
    receiver: mpsc::Receiver<RegistryRequest>,
    registry: Arc<ModuleRegistry>,
}

impl RegistryActor {
    pub fn new(buffer_size: usize, registry: Arc<ModuleRegistry>) -> (Self, RegistryClient) {
        let (sender, receiver) = mpsc::channel(buffer_size);
        let client = RegistryClient {
            sender,
            registry: registry.clone(),
        };
        (Self { receiver, registry }, client)
    }

    /// Processes reload requests until every client is dropped.
    pub async fn run(mut self) {
        info!(root = %self.registry.root().display(), "Registry actor started");

        while let Some(msg) = self.receiver.recv().await {
            match msg {
                RegistryRequest::Reload { respond_to } => {
                    debug!("Reload");
                    let registry = self.registry.clone();
                    let result = tokio::task::spawn_blocking(move || registry.reload())
                        .await
                        .map_err(|e| {
                            warn!(error = %e, "Reload task failed");
                            FrameworkError::TaskFailed(e.to_string())
                        });
                    let _ = respond_to.send(result);
                }
            }
        }

        info!(generation = self.registry.snapshot().generation(), "Registry actor shutdown");
    }
}

/// Handle to the registry: reloads go through the actor, reads do not.
#[derive(Clone)]
pub struct RegistryClient {
    sender: mpsc::Sender<RegistryRequest>,
    registry: Arc<ModuleRegistry>,
}

impl RegistryClient {
    #[tracing::instrument(skip(self))]
    pub async fn reload(&self) -> Result<RegistryStatus, FrameworkError> {
        let (respond_to, response) = oneshot::channel();
        self.sender
            .send(RegistryRequest::Reload { respond_to })
            .await
            .map_err(|_| FrameworkError::ActorClosed)?;
        response.await.map_err(|_| FrameworkError::ActorDropped)?
    }

    pub fn status(&self) -> RegistryStatus {
        self.registry.status()
    }

    pub fn module(&self, name: &str) -> Option<ModuleStatus> {
        self.registry.module(name)
    }

    pub fn snapshot(&self) -> Arc<RegistrySnapshot> {
        self.registry.snapshot()
    }
}
