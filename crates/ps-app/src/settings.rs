//! Effective list settings: configuration facts resolved against defaults.
//! 列表设置：将配置事实与默认值合并。

use ps_core::{AppConfig, MAX_PAGE_LIMIT};
use tokio::time::Duration;

pub const DEFAULT_PAGE_SIZE: usize = 50;
pub const DEFAULT_FETCH_THRESHOLD: usize = 8;
pub const DEFAULT_OVERSCAN: usize = 4;
pub const DEFAULT_ESTIMATED_ITEM_HEIGHT: u32 = 64;
pub const DEFAULT_VIEWPORT_HEIGHT: u32 = 720;
pub const DEFAULT_PREVIEW_DEBOUNCE: Duration = Duration::from_millis(600);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListSettings {
    pub page_size: usize,
    pub fetch_threshold: usize,
    pub overscan: usize,
    pub estimated_item_height: u32,
    pub viewport_height: u32,
    pub preview_debounce: Duration,
}

impl Default for ListSettings {
    fn default() -> Self {
        Self {
            page_size: DEFAULT_PAGE_SIZE,
            fetch_threshold: DEFAULT_FETCH_THRESHOLD,
            overscan: DEFAULT_OVERSCAN,
            estimated_item_height: DEFAULT_ESTIMATED_ITEM_HEIGHT,
            viewport_height: DEFAULT_VIEWPORT_HEIGHT,
            preview_debounce: DEFAULT_PREVIEW_DEBOUNCE,
        }
    }
}

fn or_default<T: PartialEq + Default>(value: T, default: T) -> T {
    if value == T::default() {
        default
    } else {
        value
    }
}

impl ListSettings {
    /// Zero values in the config mean "not configured".
    pub fn from_config(config: &AppConfig) -> Self {
        let defaults = Self::default();
        Self {
            page_size: or_default(config.page_size, defaults.page_size).min(MAX_PAGE_LIMIT),
            fetch_threshold: or_default(config.fetch_threshold, defaults.fetch_threshold),
            overscan: or_default(config.overscan, defaults.overscan),
            estimated_item_height: or_default(
                config.estimated_item_height,
                defaults.estimated_item_height,
            ),
            viewport_height: defaults.viewport_height,
            preview_debounce: match config.preview_debounce_ms {
                0 => defaults.preview_debounce,
                ms => Duration::from_millis(ms),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_config_yields_defaults() {
        assert_eq!(ListSettings::from_config(&AppConfig::empty()), ListSettings::default());
    }

    #[test]
    fn configured_values_win_and_page_size_is_capped() {
        let mut config = AppConfig::empty();
        config.page_size = 5_000;
        config.fetch_threshold = 3;
        config.preview_debounce_ms = 250;

        let settings = ListSettings::from_config(&config);

        assert_eq!(settings.page_size, MAX_PAGE_LIMIT);
        assert_eq!(settings.fetch_threshold, 3);
        assert_eq!(settings.overscan, DEFAULT_OVERSCAN);
        assert_eq!(settings.preview_debounce, Duration::from_millis(250));
    }
}
