use crate::domain::device::Device;
use crate::domain::period::Language;
use crate::infrastructure::retry::RetryPolicy;
use serde::Deserialize;
use std::time::Duration;

const CONFIG_PATH_VAR: &str = "UPS_CHARTS_CONFIG";
const DEFAULT_CONFIG_PATH: &str = "config/dashboard";

#[derive(Debug, Deserialize, Clone)]
pub struct DashboardConfig {
    #[serde(default)]
    pub backend: BackendSettings,
    #[serde(default)]
    pub retry: RetrySettings,
    #[serde(default)]
    pub server: ServerSettings,
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub devices: Vec<DeviceSettings>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct BackendSettings {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct RetrySettings {
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,
    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct ServerSettings {
    #[serde(default = "default_listen")]
    pub listen: String,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct DisplaySettings {
    #[serde(default)]
    pub language: Language,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DeviceSettings {
    pub id: String,
    pub room: Option<String>,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_request_timeout_secs() -> u64 {
    10
}

fn default_max_retries() -> u32 {
    5
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_listen() -> String {
    "0.0.0.0:8080".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            request_timeout_secs: default_request_timeout_secs(),
        }
    }
}

impl Default for RetrySettings {
    fn default() -> Self {
        Self {
            max_retries: default_max_retries(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            listen: default_listen(),
        }
    }
}

impl DashboardConfig {
    pub fn devices(&self) -> Vec<Device> {
        self.devices
            .iter()
            .map(|d| Device::new(d.id.clone(), d.room.clone()))
            .collect()
    }

    pub fn retry_policy(&self) -> RetryPolicy {
        RetryPolicy::new(
            self.retry.max_retries,
            Duration::from_millis(self.retry.base_delay_ms),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.backend.request_timeout_secs)
    }
}

/// Read `config/dashboard.*` (or `$UPS_CHARTS_CONFIG`), then apply
/// `UPS_CHARTS__SECTION__KEY` environment overrides.
///
/// A missing file is not an error: every section falls back to its
/// defaults and the device list stays empty.
pub fn load_dashboard_config() -> anyhow::Result<DashboardConfig> {
    let path = std::env::var(CONFIG_PATH_VAR).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    load_dashboard_config_from(&path)
}

fn load_dashboard_config_from(path: &str) -> anyhow::Result<DashboardConfig> {
    let settings = config::Config::builder()
        .add_source(config::File::with_name(path).required(false))
        .add_source(config::Environment::with_prefix("UPS_CHARTS").separator("__"))
        .build()?;

    Ok(settings.try_deserialize()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(toml: &str) -> DashboardConfig {
        config::Config::builder()
            .add_source(config::File::from_str(toml, config::FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap()
    }

    #[test]
    fn test_full_config() {
        let config = parse(
            r#"
            [backend]
            base_url = "http://nut-web:5000"
            request_timeout_secs = 3

            [retry]
            max_retries = 3
            base_delay_ms = 250

            [display]
            language = "en"

            [[devices]]
            id = "APC-3000"
            room = "Server room"

            [[devices]]
            id = "eaton"
            "#,
        );

        assert_eq!(config.backend.base_url, "http://nut-web:5000");
        assert_eq!(config.request_timeout(), Duration::from_secs(3));
        assert_eq!(config.retry_policy(), RetryPolicy::new(3, Duration::from_millis(250)));
        assert_eq!(config.display.language, Language::En);
        assert_eq!(config.server.listen, "0.0.0.0:8080");

        let devices = config.devices();
        assert_eq!(devices.len(), 2);
        assert_eq!(devices[0].id, "APC-3000");
        assert_eq!(devices[0].room.as_deref(), Some("Server room"));
        assert_eq!(devices[1].room, None);
    }

    #[test]
    fn test_defaults() {
        let config = parse("");

        assert!(config.devices().is_empty());
        assert_eq!(config.retry_policy(), RetryPolicy::default());
        assert_eq!(config.display.language, Language::It);
        assert_eq!(config.backend.base_url, "http://localhost:5000");
    }

    #[test]
    fn test_missing_file_uses_defaults() {
        let config = load_dashboard_config_from("/nonexistent/dashboard").unwrap();

        assert!(config.devices().is_empty());
        assert_eq!(config.server.listen, "0.0.0.0:8080");
        assert_eq!(config.retry_policy(), RetryPolicy::default());
    }
}
