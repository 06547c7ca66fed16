use anyhow::{Context, Result};
use std::path::{Path, PathBuf};

/// Get the PromptShelf application data root directory.
///
/// 获取 PromptShelf 应用数据根目录。
///
/// # Platform-specific Paths / 平台特定路径
/// - macOS: ~/Library/Application Support/PromptShelf
/// - Windows: %LOCALAPPDATA%\PromptShelf
/// - Linux: $XDG_DATA_HOME/promptshelf or ~/.local/share/promptshelf
///
/// This function does not create the directory.
/// 此函数不自动创建目录。
pub fn app_data_dir() -> Result<PathBuf> {
    let base_dir =
        get_platform_data_dir().context("Failed to get platform-specific data directory")?;

    #[cfg(target_os = "linux")]
    {
        Ok(base_dir.join("promptshelf"))
    }

    #[cfg(not(target_os = "linux"))]
    {
        Ok(base_dir.join("PromptShelf"))
    }
}

/// 获取数据库文件路径
pub fn db_path(data_dir: &Path) -> PathBuf {
    data_dir.join("promptshelf.db")
}

/// 获取日志目录
pub fn logs_dir(data_dir: &Path) -> PathBuf {
    data_dir.join("logs")
}

/// 根据平台获取基础数据目录
fn get_platform_data_dir() -> Result<PathBuf> {
    #[cfg(target_os = "linux")]
    {
        // 优先使用 XDG_DATA_HOME，如果不存在则使用 ~/.local/share
        if let Some(xdg_data_home) = std::env::var_os("XDG_DATA_HOME") {
            return Ok(PathBuf::from(xdg_data_home));
        }
    }

    dirs::data_local_dir().ok_or_else(|| anyhow::anyhow!("Unable to get local data directory"))
}
