use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional config file looked up in the working directory.
pub const CONFIG_FILE: &str = "dashboard.json";

const SIDEBAR_IMAGE_ID: &str = "1xj3v1YY8gUrYLJQCeglar4lmXYxAjjUJ";

// ---------------------------------------------------------------------------
// Dashboard configuration
// ---------------------------------------------------------------------------

/// Every field is optional in the JSON file:
///
/// ```json
/// {
///   "daily_path": "dashboard/day.csv",
///   "hourly_path": "dashboard/hour.csv",
///   "sidebar_image_url": "https://…",
///   "image_timeout_secs": 10,
///   "window_size": [1280.0, 900.0]
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct DashboardConfig {
    pub daily_path: PathBuf,
    pub hourly_path: PathBuf,
    pub sidebar_image_url: String,
    pub image_timeout_secs: u64,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            daily_path: PathBuf::from("dashboard/day.csv"),
            hourly_path: PathBuf::from("dashboard/hour.csv"),
            sidebar_image_url: format!(
                "https://drive.google.com/uc?export=view&id={SIDEBAR_IMAGE_ID}"
            ),
            image_timeout_secs: 10,
            window_size: [1280.0, 900.0],
        }
    }
}

impl DashboardConfig {
    /// Read `path` if it exists, otherwise fall back to the defaults.
    /// A file that exists but does not parse is an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        if !path.exists() {
            log::debug!("No {} found, using default configuration", path.display());
            return Ok(Self::default());
        }

        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config file {}", path.display()))?;
        let config: DashboardConfig = serde_json::from_str(&text)
            .with_context(|| format!("parsing config file {}", path.display()))?;

        log::info!("Loaded configuration from {}", path.display());
        Ok(config)
    }

    pub fn image_timeout(&self) -> Duration {
        Duration::from_secs(self.image_timeout_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = DashboardConfig::load_or_default(&dir.path().join(CONFIG_FILE)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert!(config.sidebar_image_url.ends_with(SIDEBAR_IMAGE_ID));
    }

    #[test]
    fn partial_file_overrides_only_given_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "daily_path": "data/day.csv", "image_timeout_secs": 3 }"#)
            .unwrap();

        let config = DashboardConfig::load_or_default(&path).unwrap();
        assert_eq!(config.daily_path, PathBuf::from("data/day.csv"));
        assert_eq!(config.image_timeout(), Duration::from_secs(3));
        assert_eq!(config.hourly_path, PathBuf::from("dashboard/hour.csv"));
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE);
        std::fs::write(&path, r#"{ "daily_path": 42 }"#).unwrap();
        assert!(DashboardConfig::load_or_default(&path).is_err());

        std::fs::write(&path, r#"{ "dayly_path": "typo.csv" }"#).unwrap();
        assert!(DashboardConfig::load_or_default(&path).is_err());
    }
}
