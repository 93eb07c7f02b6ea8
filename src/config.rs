//! Application configuration.
//!
//! Loads settings from config.json next to the executable at startup.
//! Provides camera selection and capture format preferences.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use std::sync::OnceLock;

/// Global configuration instance, initialized once at startup.
static CONFIG: OnceLock<AppConfig> = OnceLock::new();

/// Complete application configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct AppConfig {
    /// Index of the camera device to open (0 = system default).
    #[serde(default)]
    pub camera_index: u32,
    /// Preferred capture width in pixels. The camera picks the closest
    /// supported format, so this is an ideal, not a guarantee.
    #[serde(default = "default_capture_width")]
    pub capture_width: u32,
    /// Preferred capture height in pixels.
    #[serde(default = "default_capture_height")]
    pub capture_height: u32,
    /// Mirror the preview and snapshots horizontally (selfie view).
    /// The positioning overlays assume a mirrored image.
    #[serde(default = "default_mirror")]
    pub mirror: bool,
}

fn default_capture_width() -> u32 {
    1280
}

fn default_capture_height() -> u32 {
    720
}

fn default_mirror() -> bool {
    true
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            camera_index: 0,
            capture_width: default_capture_width(),
            capture_height: default_capture_height(),
            mirror: default_mirror(),
        }
    }
}

/// Loads configuration from config.json or returns defaults.
/// Looks for config.json in the same directory as the executable.
fn load_config() -> AppConfig {
    let config_path = std::env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|p| p.join("config.json")))
        .unwrap_or_else(|| Path::new("config.json").to_path_buf());

    crate::log(&format!("Looking for config at: {}", config_path.display()));

    if config_path.exists() {
        match fs::read_to_string(config_path) {
            Ok(contents) => match serde_json::from_str(&contents) {
                Ok(config) => {
                    crate::log("Config loaded from config.json");
                    return config;
                }
                Err(e) => {
                    crate::log(&format!(
                        "Failed to parse config.json: {}. Using defaults.",
                        e
                    ));
                }
            },
            Err(e) => {
                crate::log(&format!(
                    "Failed to read config.json: {}. Using defaults.",
                    e
                ));
            }
        }
    } else {
        crate::log("config.json not found. Using default config.");
    }

    AppConfig::default()
}

/// Initializes the global configuration. Call once at startup.
pub fn init_config() {
    let _ = CONFIG.set(load_config());
}

/// Returns a reference to the global configuration.
/// Panics if called before init_config().
pub fn get_config() -> &'static AppConfig {
    CONFIG
        .get()
        .expect("Config not initialized. Call init_config() first.")
}
