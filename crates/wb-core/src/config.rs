//! Pointer tool configuration
//!
//! These settings are process-wide and read on every drag frame, so changing
//! them mid-drag takes effect on the next motion event. They can be loaded
//! from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants;

/// Errors raised while loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] ron::error::SpannedError),
}

/// Pointer tool settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolConfig {
    /// Disable the Z translation handle entirely
    pub lock_z_axis: bool,
    /// Rotation snap increment in degrees (0 disables snapping)
    pub rotation_snap_degrees: f32,
    /// Screen pixels a plain drag must travel before objects move
    pub hysteresis_px: f32,
    /// World units of height per screen pixel on the Z handle
    pub z_drag_sensitivity: f32,
    /// Multiplier from mouse angle to applied rotation
    pub rotation_gain: f32,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            lock_z_axis: true,
            rotation_snap_degrees: constants::DEFAULT_ROTATION_SNAP_DEGREES,
            hysteresis_px: constants::DRAG_HYSTERESIS_PX,
            z_drag_sensitivity: constants::Z_DRAG_SENSITIVITY,
            rotation_gain: constants::ROTATION_GAIN,
        }
    }
}

impl ToolConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(text: &str) -> Result<Self, ConfigError> {
        Ok(ron::from_str(text)?)
    }

    /// Load a configuration from a RON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_ron_str(&text)
    }

    /// Whether rotation should snap, given the free-rotation modifier
    pub fn snaps_rotation(&self, free_rotation: bool) -> bool {
        !free_rotation && self.rotation_snap_degrees > 0.0
    }
}
