use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::{fs, path::PathBuf};
use tracing::debug;

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct ApiConfig {
    pub base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        ApiConfig {
            base_url: "https://expensetracker-backend.onrender.com/api/v1".to_string(),
        }
    }
}

fn default_currency_symbol() -> String {
    "$".to_string()
}

fn default_chart_window_days() -> u32 {
    30
}

#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct AppConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default = "default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "default_chart_window_days")]
    pub chart_window_days: u32,
    pub data_path: Option<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        debug!("Loading default config");
        let config_path = Self::default_config_path()?;
        Self::load_from_path(&config_path)
    }

    pub fn default_config_path() -> Result<PathBuf> {
        let proj_dirs = ProjectDirs::from("in", "codito", "xpt")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.config_dir().join("config.yaml"))
    }

    pub fn default_data_path(&self) -> Result<PathBuf> {
        if let Some(custom_path) = &self.data_path {
            return Ok(PathBuf::from(custom_path));
        }
        let proj_dirs = ProjectDirs::from("in", "codito", "xpt")
            .context("Could not determine project directories")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    pub fn load_from_path<P: AsRef<std::path::Path>>(path: P) -> Result<Self> {
        let config_str = fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file: {}", path.as_ref().display()))?;

        let config: Self = serde_yaml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config file: {}", path.as_ref().display()))?;
        debug!("Successfully loaded config");
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_deserialization() {
        let yaml_str = r#"
api:
  base_url: "http://localhost:8080/api/v1"
currency_symbol: "Rs."
chart_window_days: 31
data_path: "/tmp/xpt-data"
"#;

        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        assert_eq!(config.api.base_url, "http://localhost:8080/api/v1");
        assert_eq!(config.currency_symbol, "Rs.");
        assert_eq!(config.chart_window_days, 31);
        assert_eq!(config.data_path.as_deref(), Some("/tmp/xpt-data"));
    }

    #[test]
    fn test_config_defaults_when_fields_omitted() {
        let config: AppConfig = serde_yaml::from_str("{}").expect("Failed to deserialize");
        assert_eq!(
            config.api.base_url,
            "https://expensetracker-backend.onrender.com/api/v1"
        );
        assert_eq!(config.currency_symbol, "$");
        assert_eq!(config.chart_window_days, 30);
        assert!(config.data_path.is_none());
    }

    #[test]
    fn test_data_path_override_wins() {
        let yaml_str = r#"
data_path: "/var/lib/xpt"
"#;
        let config: AppConfig = serde_yaml::from_str(yaml_str).expect("Failed to deserialize");
        let path = config.default_data_path().expect("Failed to resolve path");
        assert_eq!(path, PathBuf::from("/var/lib/xpt"));
    }
}
