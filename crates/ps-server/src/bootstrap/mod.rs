//! Process bootstrap: tracing, configuration and server startup.
//! 进程启动：日志、配置与服务启动。

pub mod config;
pub mod run;
pub mod tracing;

pub use config::{resolve_server_config, ServerConfig, ServerOverrides, DEFAULT_PORT};
pub use run::{bind_server, run_server};
