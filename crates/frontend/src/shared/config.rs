use serde::Deserialize;

/// Application configuration.
///
/// Every section has defaults, so an override document only lists the keys it
/// changes.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(default)]
pub struct AppConfig {
    pub api: ApiConfig,
    pub scanner: ScannerConfig,
    pub sales: SalesConfig,
    pub logging: LoggingConfig,
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct ApiConfig {
    pub port: u16,
    pub base_url: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            port: 3000,
            base_url: None,
        }
    }
}

/// Keyboard-wedge scanner detection thresholds
#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct ScannerConfig {
    /// Inter-key interval below which input is treated as a scanner burst.
    pub burst_threshold_ms: f64,
    /// Silence after which a partial scan is discarded.
    pub quiet_window_ms: u32,
    pub min_barcode_length: usize,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            burst_threshold_ms: 50.0,
            quiet_window_ms: 120,
            min_barcode_length: 8,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq)]
#[serde(default)]
pub struct SalesConfig {
    pub catalog_page_size: u32,
    pub lookup_page_size: u32,
    pub search_debounce_ms: u32,
    pub toast_duration_ms: u32,
}

impl Default for SalesConfig {
    fn default() -> Self {
        Self {
            catalog_page_size: 24,
            lookup_page_size: 5,
            search_debounce_ms: 300,
            toast_duration_ms: 4000,
        }
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "debug".to_string(),
        }
    }
}

/// localStorage key holding an optional TOML override
pub const CONFIG_STORAGE_KEY: &str = "pos_config";

impl AppConfig {
    pub fn log_level(&self) -> log::Level {
        self.logging.level.parse().unwrap_or(log::Level::Debug)
    }
}

pub fn parse_config(contents: &str) -> anyhow::Result<AppConfig> {
    let config: AppConfig = toml::from_str(contents)?;
    if !(config.scanner.burst_threshold_ms > 0.0) {
        anyhow::bail!("scanner.burst_threshold_ms must be positive");
    }
    if config.scanner.min_barcode_length == 0 {
        anyhow::bail!("scanner.min_barcode_length must be at least 1");
    }
    if config.sales.lookup_page_size == 0 || config.sales.catalog_page_size == 0 {
        anyhow::bail!("sales page sizes must be at least 1");
    }
    Ok(config)
}

/// Load configuration
///
/// Search order:
/// 1. `pos_config` entry in localStorage
/// 2. Falls back to built-in defaults
pub fn load_config() -> AppConfig {
    let stored = web_sys::window()
        .and_then(|w| w.local_storage().ok().flatten())
        .and_then(|s| s.get_item(CONFIG_STORAGE_KEY).ok().flatten());

    if let Some(contents) = stored {
        match parse_config(&contents) {
            Ok(config) => {
                log::info!("Loaded configuration override from {}", CONFIG_STORAGE_KEY);
                return config;
            }
            Err(e) => log::warn!("Ignoring invalid {}: {}", CONFIG_STORAGE_KEY, e),
        }
    }

    AppConfig::default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_document_is_default() {
        let config = parse_config("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.scanner.burst_threshold_ms, 50.0);
        assert_eq!(config.scanner.quiet_window_ms, 120);
        assert_eq!(config.scanner.min_barcode_length, 8);
        assert_eq!(config.sales.lookup_page_size, 5);
        assert_eq!(config.log_level(), log::Level::Debug);
    }

    #[test]
    fn test_partial_override() {
        let contents = r#"
[api]
base_url = "https://pos.example.com"

[scanner]
quiet_window_ms = 200

[logging]
level = "warn"
"#;
        let config = parse_config(contents).unwrap();
        assert_eq!(config.api.base_url.as_deref(), Some("https://pos.example.com"));
        assert_eq!(config.api.port, 3000);
        assert_eq!(config.scanner.quiet_window_ms, 200);
        assert_eq!(config.scanner.burst_threshold_ms, 50.0);
        assert_eq!(config.log_level(), log::Level::Warn);
    }

    #[test]
    fn test_invalid_override_is_rejected() {
        assert!(parse_config("[api]\nport = \"x\"").is_err());
        assert!(parse_config("[scanner]\nburst_threshold_ms = 0.0").is_err());
        assert!(parse_config("[scanner]\nmin_barcode_length = 0").is_err());
        assert!(parse_config("[sales]\nlookup_page_size = 0").is_err());
    }

    #[test]
    fn test_unknown_log_level_defaults_to_debug() {
        let mut config = AppConfig::default();
        config.logging.level = "chatty".into();
        assert_eq!(config.log_level(), log::Level::Debug);
    }
}
