//! Command-line interface.
//! 命令行入口。

mod browse;
mod ingest;
mod serve;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use ps_core::ListKind;

pub use browse::run_browse;
pub use ingest::run_ingest;
pub use serve::run_serve;

fn default_server() -> String {
    format!("http://127.0.0.1:{}", ps_server::bootstrap::DEFAULT_PORT)
}

#[derive(Parser)]
#[command(name = "promptshelf")]
#[command(about = "Paginated prompt shelf with a local record service", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the record service
    Serve {
        /// Listen port on 127.0.0.1
        #[arg(short, long)]
        port: Option<u16>,
        /// Data directory (database and logs)
        #[arg(long)]
        data_dir: Option<PathBuf>,
        /// TOML config file
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Read generated lines from stdin and add them as one batch
    Ingest {
        /// Target list
        #[arg(short, long, default_value = "generated")]
        list: ListKind,
        /// Record service URL
        #[arg(short, long, default_value_t = default_server())]
        server: String,
    },
    /// Scroll through a list as a virtualized viewport would
    Browse {
        /// List to browse
        #[arg(short, long, default_value = "generated")]
        list: ListKind,
        /// Case-insensitive text filter
        #[arg(short, long, default_value = "")]
        query: String,
        /// Stop after printing N records
        #[arg(short, long)]
        max: Option<usize>,
        /// Record service URL
        #[arg(short, long, default_value_t = default_server())]
        server: String,
    },
}

impl Commands {
    pub fn is_server(&self) -> bool {
        matches!(self, Commands::Serve { .. })
    }
}
