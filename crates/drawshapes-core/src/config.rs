//! Editor configuration.
//!
//! Loaded from JSON. Every field is optional; missing fields take the editor defaults.
//!
//! ```json
//! { "move_distance": 10, "undo_limit": null, "redo_policy": "clear_on_push" }
//! ```

use crate::effects::EffectTiming;
use crate::history::RedoPolicy;
use crate::shapes::{Color, ShapeKind};
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Value out of range for '{key}': {value}")]
    ValueOutOfRange { key: &'static str, value: i64 },
}

/// Tunables for the editor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Distance moved by one `w`/`a`/`s`/`d` key press.
    pub move_distance: i32,
    pub square_side: i32,
    pub circle_diameter: i32,
    pub rectangle_width: i32,
    pub rectangle_height: i32,
    /// Maximum undo depth (`None` = unbounded).
    pub undo_limit: Option<usize>,
    pub redo_policy: RedoPolicy,
    pub pulse: EffectTiming,
    pub dance: EffectTiming,
    /// Shape placed by a primary click at startup.
    pub default_tool: ShapeKind,
    pub default_color: Color,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            move_distance: 25,
            square_side: 100,
            circle_diameter: 100,
            rectangle_width: 100,
            rectangle_height: 200,
            undo_limit: Some(50),
            redo_policy: RedoPolicy::Keep,
            pulse: EffectTiming::PULSE,
            dance: EffectTiming::DANCE,
            default_tool: ShapeKind::Square,
            default_color: Color::Red,
        }
    }
}

impl EditorConfig {
    /// Parse and validate a JSON config.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: EditorConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded editor config from {}", path.display());
        Ok(config)
    }

    /// Shape sizes must be positive; the move distance may be anything.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let sizes = [
            ("square_side", self.square_side),
            ("circle_diameter", self.circle_diameter),
            ("rectangle_width", self.rectangle_width),
            ("rectangle_height", self.rectangle_height),
        ];
        for (key, value) in sizes {
            if value <= 0 {
                return Err(ConfigError::ValueOutOfRange {
                    key,
                    value: value.into(),
                });
            }
        }
        Ok(())
    }
}
