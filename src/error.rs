use media_grid::{ConfigError, FailureKind, Localizer, PickerError};
use std::fmt;

/// Central error types for the picker app
#[derive(Debug)]
pub enum AppError {
    /// Picker core error (permissions, camera, session)
    Picker(PickerError),
    /// Filesystem error
    Filesystem(std::io::Error),
    /// Settings file could not be used
    Config(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            AppError::Picker(e) => write!(f, "Picker error: {}", e),
            AppError::Filesystem(e) => write!(f, "Filesystem error: {}", e),
            AppError::Config(msg) => write!(f, "Configuration error: {}", msg),
        }
    }
}

impl std::error::Error for AppError {}

// Conversions from other error types
impl From<PickerError> for AppError {
    fn from(e: PickerError) -> Self {
        AppError::Picker(e)
    }
}

impl From<std::io::Error> for AppError {
    fn from(e: std::io::Error) -> Self {
        AppError::Filesystem(e)
    }
}

impl From<ConfigError> for AppError {
    fn from(e: ConfigError) -> Self {
        AppError::Config(e.to_string())
    }
}

impl From<toml::de::Error> for AppError {
    fn from(e: toml::de::Error) -> Self {
        AppError::Config(e.to_string())
    }
}

/// User-friendly error messages for UI (translated via the localizer)
impl AppError {
    pub fn user_message(&self, localizer: &dyn Localizer) -> String {
        match self {
            AppError::Picker(e) => localizer.failure(&FailureKind::from(e)),
            AppError::Filesystem(_) => {
                "Error accessing files. Please check app permissions.".to_string()
            }
            AppError::Config(msg) => msg.clone(),
        }
    }
}
