mod cli;

use clap::Parser;

use cli::{Cli, Commands};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if !cli.command.is_server() {
        ps_server::bootstrap::tracing::init_tracing_subscriber(None, true)?;
    }

    match cli.command {
        Commands::Serve {
            port,
            data_dir,
            config,
        } => cli::run_serve(port, data_dir, config).await,
        Commands::Ingest { list, server } => cli::run_ingest(list, server).await,
        Commands::Browse {
            list,
            query,
            max,
            server,
        } => cli::run_browse(list, query, max, server).await,
    }
}
