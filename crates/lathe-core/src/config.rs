//! Construction-time parameters of a lathe.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{LatheError, Result};
use crate::traits::Validate;

/// Shape of the stock cross-section before any carving.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CrossSectionKind {
    /// Round stock; every spoke starts at the base radius.
    #[default]
    Circle,
    /// Rounded-square stock inscribed in the base circle.
    Square,
}

/// Parameters fixed at construction. Changing any of them means recreating the lathe.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatheConfig {
    /// Spokes around the circumference.
    pub radial_segments: usize,
    /// Divisions along the axis; each spoke holds `axial_segments + 1` samples.
    pub axial_segments: usize,
    /// Axial length of the stock.
    pub length: f64,
    /// Radius of the uncut stock.
    pub base_radius: f64,
    /// Spin rate at full throttle, in degrees per second.
    pub max_spin_rate: f64,
    /// Axial width of the cutting tool.
    pub tool_width: f64,
    pub cross_section: CrossSectionKind,
}

impl LatheConfig {
    pub const MIN_RADIAL_SEGMENTS: usize = 4;
    pub const MIN_AXIAL_SEGMENTS: usize = 1;

    /// Parse and validate a TOML document.
    pub fn from_toml_str(s: &str) -> Result<Self> {
        let config: Self = toml::from_str(s)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }

    /// Distance between neighbouring axial samples.
    pub fn axial_step(&self) -> f64 {
        self.length / self.axial_segments as f64
    }

    /// Angle between neighbouring spokes, in radians.
    pub fn angle_step(&self) -> f64 {
        std::f64::consts::TAU / self.radial_segments as f64
    }
}

impl Default for LatheConfig {
    fn default() -> Self {
        Self {
            radial_segments: 32,
            axial_segments: 20,
            length: 1.0,
            base_radius: 0.1,
            max_spin_rate: 100.0,
            tool_width: 0.0,
            cross_section: CrossSectionKind::Circle,
        }
    }
}

impl Validate for LatheConfig {
    fn validate(&self) -> Result<()> {
        if self.radial_segments < Self::MIN_RADIAL_SEGMENTS {
            return Err(LatheError::InvalidConfig(format!(
                "radial_segments must be at least {}, got {}",
                Self::MIN_RADIAL_SEGMENTS,
                self.radial_segments
            )));
        }
        if self.axial_segments < Self::MIN_AXIAL_SEGMENTS {
            return Err(LatheError::InvalidConfig(format!(
                "axial_segments must be at least {}, got {}",
                Self::MIN_AXIAL_SEGMENTS,
                self.axial_segments
            )));
        }
        if !(self.length.is_finite() && self.length > 0.0) {
            return Err(LatheError::InvalidConfig(format!(
                "length must be positive, got {}",
                self.length
            )));
        }
        if !(self.base_radius.is_finite() && self.base_radius > 0.0) {
            return Err(LatheError::InvalidConfig(format!(
                "base_radius must be positive, got {}",
                self.base_radius
            )));
        }
        if !(self.max_spin_rate.is_finite() && self.max_spin_rate >= 0.0) {
            return Err(LatheError::InvalidConfig(format!(
                "max_spin_rate must be non-negative, got {}",
                self.max_spin_rate
            )));
        }
        if !(self.tool_width.is_finite() && self.tool_width >= 0.0) {
            return Err(LatheError::InvalidConfig(format!(
                "tool_width must be non-negative, got {}",
                self.tool_width
            )));
        }
        Ok(())
    }
}
