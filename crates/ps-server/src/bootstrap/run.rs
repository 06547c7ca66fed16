use std::future::Future;
use std::net::SocketAddr;

use anyhow::{Context, Result};
use tracing::info;

use super::config::ServerConfig;
use crate::routes::{self, ApiState};

/// Opens the store under `config.data_dir` and binds the routes on
/// `127.0.0.1:{port}`. Returns the bound address and the server future,
/// which completes after `shutdown` resolves.
pub fn bind_server(
    config: &ServerConfig,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<(SocketAddr, impl Future<Output = ()>)> {
    let store = ps_infra::open_sqlite_store(&config.data_dir)?;
    let state = ApiState::new(store, config.default_page_size);

    let addr = SocketAddr::from(([127, 0, 0, 1], config.port));
    warp::serve(routes::api(state))
        .try_bind_with_graceful_shutdown(addr, shutdown)
        .with_context(|| format!("Failed to bind record service on {}", addr))
}

/// Runs the record service until Ctrl-C.
pub async fn run_server(config: ServerConfig) -> Result<()> {
    let (addr, server) = bind_server(&config, async {
        let _ = tokio::signal::ctrl_c().await;
    })?;

    info!(
        %addr,
        data_dir = %config.data_dir.display(),
        default_page_size = config.default_page_size,
        "record service listening"
    );
    server.await;
    info!("record service stopped");
    Ok(())
}
