use crate::error::AppError;
use crate::filesystem::default_photo_dir;
use media_grid::PickerConfig;
use serde::Deserialize;
use std::path::{Path, PathBuf};

/// Environment variable pointing at a settings file
pub const CONFIG_ENV: &str = "SHEET_PICKER_CONFIG";
/// Settings file looked up in the working directory
pub const CONFIG_FILE: &str = "picker.toml";

/// Host settings, read from TOML
///
/// ```toml
/// photo_dir = "./data/photos"
/// camera_available = true
/// camera_granted = true
/// language = "de-DE"
///
/// [picker]
/// variant = "always_expanded"
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct AppSettings {
    pub photo_dir: PathBuf,
    pub camera_available: bool,
    pub camera_granted: bool,
    /// BCP 47 tag of the UI language, `en-US` or `de-DE`
    pub language: String,
    pub picker: PickerConfig,
}

impl Default for AppSettings {
    fn default() -> Self {
        Self {
            photo_dir: default_photo_dir(),
            camera_available: true,
            camera_granted: true,
            language: "en-US".to_string(),
            picker: PickerConfig::default(),
        }
    }
}

impl AppSettings {
    pub fn from_toml(s: &str) -> Result<Self, AppError> {
        let settings: AppSettings = toml::from_str(s)?;
        settings.picker.validate()?;
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<Self, AppError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Reads `$SHEET_PICKER_CONFIG`, then `./picker.toml`, falling back to defaults
    pub fn load() -> Self {
        let path = match std::env::var_os(CONFIG_ENV) {
            Some(path) => PathBuf::from(path),
            None => PathBuf::from(CONFIG_FILE),
        };
        if !path.exists() {
            log::info!("No settings at {:?}, using defaults", path);
            return Self::default();
        }
        match Self::from_file(&path) {
            Ok(settings) => {
                log::info!("Loaded settings from {:?}", path);
                settings
            }
            Err(e) => {
                log::error!("Invalid settings in {:?}: {}", path, e);
                Self::default()
            }
        }
    }
}
