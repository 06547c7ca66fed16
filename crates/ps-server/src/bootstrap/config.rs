//! # Server configuration / 服务配置
//!
//! Resolves the effective server settings from the config file DTO and
//! command-line overrides. Precedence: flag, then file, then default.
//! 优先级：命令行参数 > 配置文件 > 默认值。

use std::path::{Path, PathBuf};

use anyhow::Result;
use ps_app::settings::ListSettings;
use ps_core::AppConfig;

pub const DEFAULT_PORT: u16 = 7411;

/// Values given on the command line.
#[derive(Debug, Clone, Default)]
pub struct ServerOverrides {
    pub port: Option<u16>,
    pub data_dir: Option<PathBuf>,
    pub config_path: Option<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub data_dir: PathBuf,
    /// Page limit for list requests that carry none.
    pub default_page_size: usize,
}

impl ServerConfig {
    pub fn logs_dir(&self) -> PathBuf {
        ps_infra::fs::logs_dir(&self.data_dir)
    }
}

/// Loads the config file named in `overrides` (if any) and applies the
/// overrides on top.
pub fn resolve_server_config(overrides: &ServerOverrides) -> Result<ServerConfig> {
    let file_config = match &overrides.config_path {
        Some(path) => ps_infra::load_config(path)?,
        None => AppConfig::empty(),
    };
    let default_data_dir = match (&overrides.data_dir, file_config.data_dir.as_os_str().is_empty()) {
        (None, true) => Some(ps_infra::fs::app_data_dir()?),
        _ => None,
    };
    Ok(merge(&file_config, overrides, default_data_dir.as_deref()))
}

fn merge(file: &AppConfig, overrides: &ServerOverrides, default_data_dir: Option<&Path>) -> ServerConfig {
    let port = overrides.port.unwrap_or(match file.listen_port {
        0 => DEFAULT_PORT,
        port => port,
    });
    let data_dir = overrides
        .data_dir
        .clone()
        .or_else(|| (!file.data_dir.as_os_str().is_empty()).then(|| file.data_dir.clone()))
        .or_else(|| default_data_dir.map(Path::to_path_buf))
        .unwrap_or_default();

    ServerConfig {
        port,
        data_dir,
        default_page_size: ListSettings::from_config(file).page_size,
    }
}
