//! Client configuration embedded from `config.toml`.

use once_cell::sync::Lazy;
use serde::Deserialize;

const EMBEDDED_CONFIG: &str = include_str!("../../config.toml");

static CONFIG: Lazy<AppConfig> = Lazy::new(|| load_config(EMBEDDED_CONFIG));

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ApiConfig {
    /// Absolute backend origin; empty means "same host, `port`".
    #[serde(default)]
    pub base_url: String,
    #[serde(default = "default_port")]
    pub port: u16,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UiConfig {
    #[serde(default = "default_debounce_ms")]
    pub auto_apply_debounce_ms: u32,
    #[serde(default = "default_success_ms")]
    pub success_alert_ms: u32,
    #[serde(default = "default_info_ms")]
    pub info_alert_ms: u32,
    #[serde(default = "default_page_size")]
    pub default_page_size: usize,
    #[serde(default = "default_page_size_options")]
    pub page_size_options: Vec<usize>,
    #[serde(default = "default_recent_orders_limit")]
    pub recent_orders_limit: usize,
}

fn default_port() -> u16 {
    8000
}

fn default_debounce_ms() -> u32 {
    1000
}

fn default_success_ms() -> u32 {
    3000
}

fn default_info_ms() -> u32 {
    5000
}

fn default_page_size() -> usize {
    25
}

fn default_page_size_options() -> Vec<usize> {
    vec![10, 25, 50, 100]
}

fn default_recent_orders_limit() -> usize {
    10
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            port: default_port(),
        }
    }
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            auto_apply_debounce_ms: default_debounce_ms(),
            success_alert_ms: default_success_ms(),
            info_alert_ms: default_info_ms(),
            default_page_size: default_page_size(),
            page_size_options: default_page_size_options(),
            recent_orders_limit: default_recent_orders_limit(),
        }
    }
}

/// Global configuration, parsed once.
pub fn config() -> &'static AppConfig {
    &CONFIG
}

fn load_config(raw: &str) -> AppConfig {
    match toml::from_str::<AppConfig>(raw) {
        Ok(config) => config,
        Err(e) => {
            log::warn!("config.toml is invalid ({}), using built-in defaults", e);
            AppConfig::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_embedded_config_loads() {
        let config: Result<AppConfig, _> = toml::from_str(EMBEDDED_CONFIG);
        assert!(config.is_ok());
        let config = config.unwrap();
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.ui.auto_apply_debounce_ms, 1000);
        assert!(config.ui.page_size_options.contains(&config.ui.default_page_size));
    }

    #[test]
    fn test_partial_config_uses_defaults() {
        let config = load_config("[api]\nbase_url = \"https://bi.example.com\"\n");
        assert_eq!(config.api.base_url, "https://bi.example.com");
        assert_eq!(config.api.port, 8000);
        assert_eq!(config.ui.success_alert_ms, 3000);
    }

    #[test]
    fn test_invalid_config_falls_back() {
        let config = load_config("this is not toml = [");
        assert_eq!(config.ui.default_page_size, 25);
    }
}
