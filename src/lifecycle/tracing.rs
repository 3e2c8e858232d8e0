//! # Observability & Tracing
//!
//! Structured logging via `tracing`, configured from `RUST_LOG` (default `info`).
//!
//! The compact format hides the crate/module prefix (`with_target(false)`); log lines
//! carry structured fields such as `module`, `entity` and `generation` instead.
//!
//! ```bash
//! # Registry scans, fixture loads, per-request dispatch spans
//! RUST_LOG=debug module-hub
//!
//! # Only the registry
//! RUST_LOG=module_hub::registry=debug module-hub
//! ```
//!
//! With `RUST_LOG=info` a startup looks like:
//!
//! ```text
//! INFO Fixtures loaded entity="user" path=demos/data/mock/users.json count=3
//! INFO Registry reloaded generation=1 total=3 loaded=3
//! INFO Module loaded module=module-a display_name=User Management version=1.0.0 developer=Developer A
//! INFO Registry actor started root=demos/modules
//! INFO Listening addr=127.0.0.1:9501 mock_mode=true
//! ```

use tracing_subscriber::EnvFilter;

pub fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}
