use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

// ---------------------------------------------------------------------------
// Application configuration
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default = "default_window_width")]
    pub window_width: f32,
    #[serde(default = "default_window_height")]
    pub window_height: f32,
    /// Where the b/w originals live.
    #[serde(default = "default_bw_dir")]
    pub bw_dir: String,
    /// Where the high-contrast colorizations live.
    #[serde(default = "default_high_dir")]
    pub high_dir: String,
    /// Where the regular colorizations live. When empty, `high_dir` is used.
    #[serde(default)]
    pub color_dir: String,
    /// Pair manifest listing b/w and color filenames.
    #[serde(default = "default_manifest_path")]
    pub manifest_path: String,
    /// Key prefix for persisted ratings. When empty, the manifest path is used
    /// so galleries with different manifests never share ratings.
    #[serde(default)]
    pub rating_scope: String,
    /// Park single clicks briefly so a double click can cancel them. Defaults
    /// on for macOS, where trackpad double taps arrive late.
    #[serde(default = "default_defer_single_click")]
    pub defer_single_click: bool,
}

fn default_window_width() -> f32 {
    1280.0
}
fn default_window_height() -> f32 {
    800.0
}
fn default_bw_dir() -> String {
    "./local_bw".to_string()
}
fn default_high_dir() -> String {
    "./local_high".to_string()
}
fn default_manifest_path() -> String {
    "pairs.json".to_string()
}
fn default_defer_single_click() -> bool {
    cfg!(target_os = "macos")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_width: default_window_width(),
            window_height: default_window_height(),
            bw_dir: default_bw_dir(),
            high_dir: default_high_dir(),
            color_dir: String::new(),
            manifest_path: default_manifest_path(),
            rating_scope: String::new(),
            defer_single_click: default_defer_single_click(),
        }
    }
}

impl AppConfig {
    /// Load configuration from next to the executable, falling back to defaults.
    pub fn load() -> Self {
        let path = config_path();
        if path.exists() {
            match fs::read_to_string(&path) {
                Ok(json) => match serde_json::from_str::<AppConfig>(&json) {
                    Ok(config) => {
                        info!("Loaded configuration from {}", path.display());
                        return config;
                    }
                    Err(e) => {
                        error!("Failed to parse configuration: {e}");
                    }
                },
                Err(e) => {
                    error!("Failed to read configuration file: {e}");
                }
            }
        } else {
            debug!("No configuration file at {}", path.display());
        }
        Self::default()
    }

    /// Persist configuration to disk.
    pub fn save(&self) {
        let path = config_path();
        match serde_json::to_string_pretty(self) {
            Ok(json) => {
                if let Err(e) = fs::write(&path, &json) {
                    error!("Failed to write configuration: {e}");
                } else {
                    debug!("Saved configuration");
                }
            }
            Err(e) => error!("Failed to serialize configuration: {e}"),
        }
    }

    /// Directory for the regular colorizations, falling back to `high_dir`.
    pub fn color_dir(&self) -> &str {
        if self.color_dir.is_empty() {
            &self.high_dir
        } else {
            &self.color_dir
        }
    }

    /// Key prefix for persisted ratings, falling back to the manifest path.
    pub fn rating_scope(&self) -> &str {
        if self.rating_scope.is_empty() {
            &self.manifest_path
        } else {
            &self.rating_scope
        }
    }
}

fn config_path() -> PathBuf {
    crate::app_dir::exe_directory().join("config.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let config: AppConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config.bw_dir, "./local_bw");
        assert_eq!(config.color_dir(), "./local_high");
        assert_eq!(config.rating_scope(), "pairs.json");
    }

    #[test]
    fn explicit_color_dir_and_scope_win() {
        let config: AppConfig = serde_json::from_str(
            r#"{"color_dir": "./color", "rating_scope": "gallery-a"}"#,
        )
        .unwrap();
        assert_eq!(config.color_dir(), "./color");
        assert_eq!(config.rating_scope(), "gallery-a");
    }
}
