use anyhow::Context;
use module_hub::config::HubConfig;
use module_hub::lifecycle::{setup_tracing, HubSystem};
use tokio::net::TcpListener;
use tracing::info;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    setup_tracing();

    let config = HubConfig::load().context("loading configuration")?;
    info!(
        modules = %config.modules_root().display(),
        fixtures = %config.fixtures_root().display(),
        "Starting module hub"
    );

    let system = HubSystem::start(config).await?;
    let addr = system.config().bind_addr.clone();
    let listener = TcpListener::bind(&addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    info!(%addr, mock_mode = system.dispatcher.mode().is_mock(), "Listening");

    axum::serve(listener, system.router())
        .with_graceful_shutdown(async {
            let _ = tokio::signal::ctrl_c().await;
            info!("Ctrl-C received");
        })
        .await
        .context("serving")?;

    system.shutdown().await?;
    Ok(())
}
