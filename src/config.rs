use serde::{Deserialize, Serialize};

use crate::brush::BrushConfig;
use crate::error::ConfigError;

/// Startup settings for a drawing session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)] // missing fields fall back to the defaults below
pub struct CanvasConfig {
    pub width: u32,
    pub height: u32,
    /// Brush in effect for the first stroke
    pub brush: BrushConfig,
    /// File name used when saving the drawing
    pub export_file_name: String,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: 800,
            height: 700,
            brush: BrushConfig::default(),
            export_file_name: "drawing.png".to_owned(),
        }
    }
}

impl CanvasConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: CanvasConfig = serde_json::from_str(json)?;
        config.validated()
    }

    pub fn to_json_string(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Rejects an empty surface and clamps the brush into range
    pub fn validated(self) -> Result<Self, ConfigError> {
        if self.width == 0 || self.height == 0 {
            return Err(ConfigError::EmptyCanvas {
                width: self.width,
                height: self.height,
            });
        }
        Ok(Self {
            brush: self.brush.normalized(),
            ..self
        })
    }
}
