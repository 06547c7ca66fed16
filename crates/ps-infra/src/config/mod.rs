//! # Configuration Loader / 配置加载器
//!
//! Reads a TOML file into the [`AppConfig`] DTO. Values are taken as they
//! are; defaults are applied by the application layer.
//! 读取 TOML 文件为 AppConfig DTO，不做校验，默认值由应用层决定。

use std::path::Path;

use anyhow::Context;
use ps_core::AppConfig;

/// Load configuration from a TOML file
/// 从 TOML 文件加载配置
///
/// # Errors / 错误
///
/// Returns error if the file cannot be read or is not valid TOML.
/// 无法读取文件或内容不是有效 TOML 时返回错误。
pub fn load_config(config_path: &Path) -> anyhow::Result<AppConfig> {
    let content = std::fs::read_to_string(config_path)
        .with_context(|| format!("Failed to read config file: {}", config_path.display()))?;
    let toml_value: toml::Value =
        toml::from_str(&content).context("Failed to parse config as TOML")?;
    AppConfig::from_toml(&toml_value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_load_config_reads_valid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
            [server]
            port = 8080

            [list]
            page_size = 25
            overscan = 2
            "#
        )
        .unwrap();

        let config = load_config(file.path()).unwrap();

        assert_eq!(config.listen_port, 8080);
        assert_eq!(config.page_size, 25);
        assert_eq!(config.overscan, 2);
        assert_eq!(config.fetch_threshold, 0);
        assert!(config.data_dir.as_os_str().is_empty());
    }

    #[test]
    fn test_load_config_tolerates_missing_sections() {
        let file = NamedTempFile::new().unwrap();
        let config = load_config(file.path()).unwrap();
        assert_eq!(config, AppConfig::empty());
    }

    #[test]
    fn test_load_config_reports_missing_file() {
        let err = load_config(Path::new("/nonexistent/promptshelf.toml")).unwrap_err();
        assert!(err.to_string().contains("Failed to read config file"));
    }

    #[test]
    fn test_load_config_rejects_invalid_toml() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "[server\nport = ").unwrap();
        let err = load_config(file.path()).unwrap_err();
        assert!(err.to_string().contains("TOML"));
    }
}
