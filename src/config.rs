use std::fs;
use std::path::Path;

use egui::{Color32, Rect, Vec2};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::geometry::DEFAULT_HANDLE_RADIUS;
use crate::stroke::DrawingTool;

/// Errors that can occur while loading editor configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid config value: {0}")]
    Invalid(String),
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;

/// How the crop overlay is placed inside its parent when created or reset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum OverlayPlacement {
    /// Always the same rectangle, in parent-local coordinates
    Fixed(Rect),
    /// Centered, covering `fraction` of the parent on each axis
    Centered { fraction: f32 },
    /// Parent bounds shrunk by `margin` on every side
    Inset { margin: f32 },
}

impl Default for OverlayPlacement {
    fn default() -> Self {
        Self::Centered { fraction: 0.8 }
    }
}

impl OverlayPlacement {
    /// Resolve the placement against a parent of size `parent`.
    ///
    /// The result never drops below `min_size` on either axis.
    pub fn resolve(&self, parent: Vec2, min_size: f32) -> Rect {
        let rect = match *self {
            OverlayPlacement::Fixed(rect) => rect,
            OverlayPlacement::Centered { fraction } => {
                let size = parent * fraction;
                Rect::from_center_size((parent / 2.0).to_pos2(), size)
            }
            OverlayPlacement::Inset { margin } => {
                Rect::from_min_size(egui::pos2(margin, margin), parent - Vec2::splat(margin * 2.0))
            }
        };

        Rect::from_min_size(rect.min, rect.size().max(Vec2::splat(min_size)))
    }
}

/// Paint attributes used when a stroke is started with a given tool
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BrushSettings {
    /// Ignored for the eraser, whose strokes always clear to transparent
    pub color: Color32,
    pub width: f32,
}

/// Tunables for the crop overlay and the drawing tools
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Smallest width or height the crop overlay may be resized to
    pub min_size: f32,
    /// Grab radius around each resize handle
    pub handle_radius: f32,
    pub overlay_placement: OverlayPlacement,
    pub pen: BrushSettings,
    /// Only `width` applies; see [`Paint::for_tool`](crate::stroke::Paint::for_tool)
    pub eraser: BrushSettings,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            min_size: 50.0,
            handle_radius: DEFAULT_HANDLE_RADIUS,
            overlay_placement: OverlayPlacement::default(),
            pen: BrushSettings {
                color: Color32::WHITE,
                width: 4.0,
            },
            eraser: BrushSettings {
                color: Color32::TRANSPARENT,
                width: 20.0,
            },
        }
    }
}

impl EditorConfig {
    /// Parse a config from JSON. Missing fields take their default values.
    pub fn from_json_str(json: &str) -> ConfigResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a JSON file on disk
    pub fn load(path: impl AsRef<Path>) -> ConfigResult<Self> {
        let path = path.as_ref();
        let json = fs::read_to_string(path)?;
        log::info!("Loading editor config from {}", path.display());
        Self::from_json_str(&json)
    }

    pub fn to_json_string(&self) -> ConfigResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Brush settings for `tool`
    pub fn brush(&self, tool: DrawingTool) -> BrushSettings {
        match tool {
            DrawingTool::Pen => self.pen,
            DrawingTool::Eraser => self.eraser,
        }
    }

    pub fn validate(&self) -> ConfigResult<()> {
        if !(self.min_size.is_finite() && self.min_size > 0.0) {
            return Err(ConfigError::Invalid(format!(
                "min_size must be positive, got {}",
                self.min_size
            )));
        }
        if !(self.handle_radius.is_finite() && self.handle_radius >= 0.0) {
            return Err(ConfigError::Invalid(format!(
                "handle_radius must not be negative, got {}",
                self.handle_radius
            )));
        }
        for (name, brush) in [("pen", &self.pen), ("eraser", &self.eraser)] {
            if !(brush.width.is_finite() && brush.width > 0.0) {
                return Err(ConfigError::Invalid(format!(
                    "{} width must be positive, got {}",
                    name, brush.width
                )));
            }
        }
        match self.overlay_placement {
            OverlayPlacement::Centered { fraction } if !(fraction > 0.0 && fraction <= 1.0) => {
                Err(ConfigError::Invalid(format!(
                    "overlay fraction must be in (0, 1], got {}",
                    fraction
                )))
            }
            OverlayPlacement::Inset { margin } if !(margin.is_finite() && margin >= 0.0) => {
                Err(ConfigError::Invalid(format!(
                    "overlay margin must not be negative, got {}",
                    margin
                )))
            }
            OverlayPlacement::Fixed(rect) if !rect.is_finite() => Err(ConfigError::Invalid(
                format!("overlay rectangle must be finite, got {:?}", rect),
            )),
            _ => Ok(()),
        }
    }
}
