/// Which system permission a failure refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Permission {
    Camera,
    PhotoLibrary,
}

/// Error type for picker operations
///
/// None of these are fatal: the picker degrades to showing no content or no
/// camera cell. Failures are surfaced to the host once and never retried.
#[derive(Debug, Clone, PartialEq)]
pub enum PickerError {
    PermissionDenied(Permission),
    DeviceUnsupported,
    Underlying(String),
    /// The session already emitted its outbound event
    SessionFinished,
}

impl std::fmt::Display for PickerError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PickerError::PermissionDenied(Permission::Camera) => {
                write!(f, "Permission denied: camera")
            }
            PickerError::PermissionDenied(Permission::PhotoLibrary) => {
                write!(f, "Permission denied: photo library")
            }
            PickerError::DeviceUnsupported => write!(f, "Camera device unsupported"),
            PickerError::Underlying(msg) => write!(f, "Error: {}", msg),
            PickerError::SessionFinished => write!(f, "Picker session already finished"),
        }
    }
}

impl std::error::Error for PickerError {}

impl From<std::io::Error> for PickerError {
    fn from(err: std::io::Error) -> Self {
        PickerError::Underlying(err.to_string())
    }
}

/// Error type for thumbnail rendering
#[derive(Debug)]
pub enum ThumbnailError {
    ImageLoadError(String),
    ImageSaveError(String),
}

impl std::fmt::Display for ThumbnailError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ThumbnailError::ImageLoadError(msg) => write!(f, "Image load error: {}", msg),
            ThumbnailError::ImageSaveError(msg) => write!(f, "Image save error: {}", msg),
        }
    }
}

impl std::error::Error for ThumbnailError {}

/// Error type for configuration loading
#[derive(Debug)]
pub enum ConfigError {
    Parse(toml::de::Error),
    Invalid(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Parse(e) => write!(f, "Config parse error: {}", e),
            ConfigError::Invalid(msg) => write!(f, "Invalid config: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<toml::de::Error> for ConfigError {
    fn from(err: toml::de::Error) -> Self {
        ConfigError::Parse(err)
    }
}
