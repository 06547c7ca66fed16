use std::path::PathBuf;

use anyhow::Result;
use ps_server::bootstrap::{resolve_server_config, run_server, ServerOverrides};

pub async fn run_serve(
    port: Option<u16>,
    data_dir: Option<PathBuf>,
    config_path: Option<PathBuf>,
) -> Result<()> {
    let config = resolve_server_config(&ServerOverrides {
        port,
        data_dir,
        config_path,
    })?;

    // File logging needs the resolved data dir, so tracing starts here.
    ps_server::bootstrap::tracing::init_tracing_subscriber(Some(&config.logs_dir()), false)?;

    run_server(config).await
}
