//! Runtime configuration from the environment (and an optional `.env` file).

use crate::api::DEFAULT_BASE_URL;
use crate::error::{AppError, Result};
use crate::view::{RenderContext, Theme};
use std::env::{self, VarError};
use std::path::PathBuf;
use std::time::Duration;
use tracing::debug;

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub api_url: String,
    pub timeout: Duration,
    pub theme: Theme,
    pub colorize: bool,
    pub download_dir: PathBuf,
    pub offline: bool,
    pub log_dir: Option<PathBuf>,
    pub log_format: LogFormat,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            theme: Theme::Dark,
            colorize: true,
            download_dir: PathBuf::from("."),
            offline: false,
            log_dir: None,
            log_format: LogFormat::Text,
        }
    }
}

/// Reads a variable, treating unset and blank the same.
fn var(name: &str) -> Result<Option<String>> {
    match env::var(name) {
        Ok(value) if value.trim().is_empty() => Ok(None),
        Ok(value) => Ok(Some(value.trim().to_string())),
        Err(VarError::NotPresent) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

fn parse_bool(name: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(AppError::Config(format!(
            "{} must be true or false, got '{}'",
            name, value
        ))),
    }
}

pub fn validate_api_url(url: &str) -> Result<String> {
    let url = url.trim().trim_end_matches('/');
    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(AppError::Config(format!(
            "API URL must start with http:// or https://, got '{}'",
            url
        )));
    }
    Ok(url.to_string())
}

impl AppConfig {
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        let mut config = Self::default();

        if let Some(url) = var("CLIMATE_API_URL")? {
            config.api_url = validate_api_url(&url)?;
        }

        if let Some(secs) = var("CLIMATE_API_TIMEOUT_SECS")? {
            let secs: u64 = secs.parse().map_err(|_| {
                AppError::Config(format!(
                    "CLIMATE_API_TIMEOUT_SECS must be a positive integer, got '{}'",
                    secs
                ))
            })?;
            if secs == 0 {
                return Err(AppError::Config(
                    "CLIMATE_API_TIMEOUT_SECS must be greater than zero".to_string(),
                ));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(theme) = var("CLIMATE_THEME")? {
            config.theme = theme.parse()?;
        }

        // Any value disables colour, including "0".
        config.colorize = env::var_os("NO_COLOR").map_or(true, |v| v.is_empty());

        if let Some(dir) = var("CLIMATE_DOWNLOAD_DIR")? {
            config.download_dir = PathBuf::from(dir);
        }

        if let Some(offline) = var("CLIMATE_OFFLINE")? {
            config.offline = parse_bool("CLIMATE_OFFLINE", &offline)?;
        }

        config.log_dir = var("CLIMATE_LOG_DIR")?.map(PathBuf::from);

        if let Some(format) = var("CLIMATE_LOG_FORMAT")? {
            config.log_format = match format.to_ascii_lowercase().as_str() {
                "text" => LogFormat::Text,
                "json" => LogFormat::Json,
                other => {
                    return Err(AppError::Config(format!(
                        "CLIMATE_LOG_FORMAT must be text or json, got '{}'",
                        other
                    )))
                },
            };
        }

        debug!("Loaded configuration: {:?}", config);
        Ok(config)
    }

    /// Applies command line flags on top of the environment.
    pub fn with_overrides(mut self, api_url: Option<&str>, offline: bool) -> Result<Self> {
        if let Some(url) = api_url {
            self.api_url = validate_api_url(url)?;
        }
        self.offline |= offline;
        Ok(self)
    }

    pub fn render_context(&self) -> RenderContext {
        RenderContext::new(self.theme, self.colorize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serial_test::serial;

    const VARS: [&str; 8] = [
        "CLIMATE_API_URL",
        "CLIMATE_API_TIMEOUT_SECS",
        "CLIMATE_THEME",
        "NO_COLOR",
        "CLIMATE_DOWNLOAD_DIR",
        "CLIMATE_OFFLINE",
        "CLIMATE_LOG_DIR",
        "CLIMATE_LOG_FORMAT",
    ];

    fn clear_env() {
        for name in VARS {
            env::remove_var(name);
        }
    }

    #[test]
    #[serial]
    fn test_defaults() {
        clear_env();
        let config = AppConfig::from_env().unwrap();
        assert_eq!(config.api_url, "http://localhost:8000");
        assert_eq!(config.timeout, Duration::from_secs(30));
        assert_eq!(config.theme, Theme::Dark);
        assert!(config.colorize);
        assert!(!config.offline);
        assert_eq!(config.log_format, LogFormat::Text);
    }

    #[test]
    #[serial]
    fn test_reads_environment() {
        clear_env();
        env::set_var("CLIMATE_API_URL", "https://climate.example.org/");
        env::set_var("CLIMATE_API_TIMEOUT_SECS", "5");
        env::set_var("CLIMATE_THEME", "light");
        env::set_var("NO_COLOR", "1");
        env::set_var("CLIMATE_OFFLINE", "yes");
        env::set_var("CLIMATE_LOG_FORMAT", "JSON");
        env::set_var("CLIMATE_LOG_DIR", "/tmp/climate-logs");

        let config = AppConfig::from_env().unwrap();
        clear_env();

        assert_eq!(config.api_url, "https://climate.example.org");
        assert_eq!(config.timeout, Duration::from_secs(5));
        assert_eq!(config.theme, Theme::Light);
        assert!(!config.colorize);
        assert!(config.offline);
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.log_dir, Some(PathBuf::from("/tmp/climate-logs")));
    }

    #[test]
    #[serial]
    fn test_invalid_values() {
        for (name, value) in [
            ("CLIMATE_API_TIMEOUT_SECS", "soon"),
            ("CLIMATE_API_TIMEOUT_SECS", "0"),
            ("CLIMATE_THEME", "sepia"),
            ("CLIMATE_OFFLINE", "maybe"),
            ("CLIMATE_LOG_FORMAT", "xml"),
            ("CLIMATE_API_URL", "localhost:8000"),
        ] {
            clear_env();
            env::set_var(name, value);
            let result = AppConfig::from_env();
            assert!(
                matches!(result, Err(AppError::Config(_))),
                "{}={} should be rejected",
                name,
                value
            );
        }
        clear_env();
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::default()
            .with_overrides(Some("http://10.0.0.5:9000"), true)
            .unwrap();
        assert_eq!(config.api_url, "http://10.0.0.5:9000");
        assert!(config.offline);
        assert!(AppConfig::default().with_overrides(Some("ftp://x"), false).is_err());
    }
}
