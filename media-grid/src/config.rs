use crate::error::ConfigError;
use crate::models::{Insets, Size};
use serde::{Deserialize, Serialize};

/// When the grid switches to enlarged previews
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PickerVariant {
    /// Expanded while the selection is non-empty
    #[default]
    SelectionDriven,
    /// Expanded for the whole session
    AlwaysExpanded,
}

/// Geometry constants for the layout engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutConfig {
    /// Expanded row height as a fraction of the viewport width
    pub max_height_ratio: f32,
    /// Compact cells are `max_height / multiplier` on each side
    pub multiplier: f32,
    pub insets: Insets,
    pub spacing: f32,
    pub selection_size: Size,
    pub selection_inset: f32,
    /// Extra pixels on each side of the viewport that still count as visible
    pub preload_margin: f32,
}

impl Default for LayoutConfig {
    fn default() -> Self {
        Self {
            max_height_ratio: 0.5,
            multiplier: 2.0,
            insets: Insets::uniform(8.0),
            spacing: 6.0,
            selection_size: Size::square(28.0),
            selection_inset: 6.0,
            preload_margin: 0.0,
        }
    }
}

/// Configuration for a picker session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PickerConfig {
    pub variant: PickerVariant,
    /// Whether the live camera cell is shown in front of the photos
    pub camera_enabled: bool,
    /// Whether the file submenu is offered
    pub document_menu: bool,
    pub viewport_width: f32,
    pub layout: LayoutConfig,
}

impl Default for PickerConfig {
    fn default() -> Self {
        Self {
            variant: PickerVariant::SelectionDriven,
            camera_enabled: true,
            document_menu: true,
            viewport_width: 375.0,
            layout: LayoutConfig::default(),
        }
    }
}

impl PickerConfig {
    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        let config: PickerConfig = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.viewport_width > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "viewport_width must be positive, got {}",
                self.viewport_width
            )));
        }
        if !(self.layout.multiplier >= 1.0) {
            return Err(ConfigError::Invalid(format!(
                "layout.multiplier must be at least 1, got {}",
                self.layout.multiplier
            )));
        }
        if !(self.layout.max_height_ratio > 0.0) {
            return Err(ConfigError::Invalid(
                "layout.max_height_ratio must be positive".to_string(),
            ));
        }
        Ok(())
    }
}
