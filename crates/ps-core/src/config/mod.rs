//! # Pure Data Module / 纯数据模块 - Data Transfer Objects Only
//!
//! ## Responsibilities / 职责
//!
//! - ✅ Define configuration data structures / 定义配置数据结构
//! - ✅ Provide TOML → DTO mapping / 提供 TOML → DTO 的映射
//!
//! ## Prohibited / 禁止事项
//!
//! ❌ **No validation logic / 禁止验证逻辑**
//! ❌ **No default value calculation / 禁止默认值计算**
//!
//! Zero and empty values are facts ("not configured"); the application
//! layer decides what they fall back to.

use std::path::PathBuf;

/// Application configuration DTO (pure data, no logic)
/// 应用配置 DTO（纯数据，无逻辑）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// `[server] port`
    pub listen_port: u16,

    /// `[storage] data_dir` (path info only, no existence check)
    pub data_dir: PathBuf,

    /// `[list] page_size`
    pub page_size: usize,

    /// `[list] fetch_threshold`, in records
    pub fetch_threshold: usize,

    /// `[list] overscan`, in records
    pub overscan: usize,

    /// `[list] estimated_item_height`, in layout units
    pub estimated_item_height: u32,

    /// `[preview] debounce_ms`
    pub preview_debounce_ms: u64,
}

fn int_at(value: &toml::Value, section: &str, key: &str) -> i64 {
    value
        .get(section)
        .and_then(|s| s.get(key))
        .and_then(|v| v.as_integer())
        .unwrap_or(0)
}

impl AppConfig {
    /// Create AppConfig from TOML value
    /// 从 TOML 值创建 AppConfig
    ///
    /// Missing sections and keys map to zero/empty. Negative integers are
    /// clamped to zero rather than rejected.
    pub fn from_toml(toml_value: &toml::Value) -> anyhow::Result<Self> {
        Ok(Self {
            listen_port: int_at(toml_value, "server", "port").clamp(0, u16::MAX as i64) as u16,
            data_dir: PathBuf::from(
                toml_value
                    .get("storage")
                    .and_then(|s| s.get("data_dir"))
                    .and_then(|v| v.as_str())
                    .unwrap_or(""),
            ),
            page_size: int_at(toml_value, "list", "page_size").max(0) as usize,
            fetch_threshold: int_at(toml_value, "list", "fetch_threshold").max(0) as usize,
            overscan: int_at(toml_value, "list", "overscan").max(0) as usize,
            estimated_item_height: int_at(toml_value, "list", "estimated_item_height")
                .clamp(0, u32::MAX as i64) as u32,
            preview_debounce_ms: int_at(toml_value, "preview", "debounce_ms").max(0) as u64,
        })
    }

    /// Create empty AppConfig (all empty/default values)
    /// 创建空的 AppConfig（所有字段为空/默认值）
    pub fn empty() -> Self {
        Self {
            listen_port: 0,
            data_dir: PathBuf::new(),
            page_size: 0,
            fetch_threshold: 0,
            overscan: 0,
            estimated_item_height: 0,
            preview_debounce_ms: 0,
        }
    }
}
