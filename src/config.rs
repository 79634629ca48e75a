use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::path::Path;

/// Application configuration
#[derive(Debug, Clone, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub overpass: OverpassSettings,
    #[serde(default)]
    pub evaluator: EvaluatorSettings,
    #[serde(default)]
    pub cache: CacheSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSettings {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    pub workers: Option<usize>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            workers: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct OverpassSettings {
    #[serde(default = "default_overpass_endpoint")]
    pub endpoint: String,
    /// Whole-request timeout for one radius attempt
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Budget handed to the Overpass server via `[timeout:N]`
    #[serde(default = "default_query_timeout_secs")]
    pub query_timeout_secs: u32,
}

impl Default for OverpassSettings {
    fn default() -> Self {
        Self {
            endpoint: default_overpass_endpoint(),
            request_timeout_secs: default_request_timeout_secs(),
            query_timeout_secs: default_query_timeout_secs(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EvaluatorSettings {
    /// Widening search radius schedule in meters, ascending
    #[serde(default = "default_radii_m")]
    pub radii_m: Vec<u32>,
}

impl Default for EvaluatorSettings {
    fn default() -> Self {
        Self {
            radii_m: default_radii_m(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CacheSettings {
    #[serde(default = "default_cache_ttl_secs")]
    pub ttl_secs: u64,
    #[serde(default = "default_cache_capacity")]
    pub max_capacity: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            ttl_secs: default_cache_ttl_secs(),
            max_capacity: default_cache_capacity(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingSettings {
    #[serde(default = "default_log_level")]
    pub level: String,
    #[serde(default = "default_log_format")]
    pub format: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    8080
}
fn default_overpass_endpoint() -> String {
    "https://overpass-api.de/api/interpreter".to_string()
}
fn default_request_timeout_secs() -> u64 {
    30
}
fn default_query_timeout_secs() -> u32 {
    25
}
fn default_radii_m() -> Vec<u32> {
    vec![5_000, 10_000, 20_000]
}
fn default_cache_ttl_secs() -> u64 {
    300
}
fn default_cache_capacity() -> u64 {
    10_000
}
fn default_log_level() -> String {
    "info".to_string()
}
fn default_log_format() -> String {
    "json".to_string()
}

impl Settings {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values in the struct
    /// 2. Configuration file (config/default.toml)
    /// 3. Local overrides (config/local.toml)
    /// 4. Environment variables (prefixed with SAFESHOT__)
    pub fn load() -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::with_name("config/default").required(false))
            .add_source(File::with_name("config/local").required(false))
            // e.g., SAFESHOT__SERVER__PORT -> server.port
            .add_source(
                Environment::with_prefix("SAFESHOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }

    /// Load configuration from a custom path
    pub fn load_from<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let settings = Config::builder()
            .add_source(File::from(path.as_ref()))
            .add_source(
                Environment::with_prefix("SAFESHOT")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        settings.try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.port, 8080);
        assert_eq!(
            settings.overpass.endpoint,
            "https://overpass-api.de/api/interpreter"
        );
        assert_eq!(settings.overpass.query_timeout_secs, 25);
        assert_eq!(settings.evaluator.radii_m, vec![5_000, 10_000, 20_000]);
        assert_eq!(settings.cache.ttl_secs, 300);
    }

    #[test]
    fn test_default_logging() {
        let logging = LoggingSettings::default();
        assert_eq!(logging.level, "info");
        assert_eq!(logging.format, "json");
    }
}
