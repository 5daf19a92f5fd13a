//! # Render Configuration
//!
//! Every size-dependent drawing constant is tuned at a reference canvas size and
//! scaled from there. The reference values live in [`ReferenceConstants`], an
//! immutable value handed to constructors, and the per-render knobs live in
//! [`RenderConfig`]. Both deserialize from JSON with every field defaulted.

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::error::{Result, SpiralError};
use crate::plotting::canvas::padded_side;
use crate::plotting::styles::Palette;

/// Canvas size at which all reference constants were tuned.
pub const REFERENCE_CANVAS_SIZE: u32 = 2800;

/// Default number of days per spiral revolution.
pub const DEFAULT_STEPS_PER_REVOLUTION: u32 = 365;

/// A magnitude → radius pair of the radius curve, in reference units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Breakpoint {
    /// Lines changed; absolute and never scaled
    pub magnitude: u64,
    /// Circle radius in reference pixels
    pub radius: f64,
}

impl Breakpoint {
    pub const fn new(magnitude: u64, radius: f64) -> Self {
        Self { magnitude, radius }
    }
}

/// Reference breakpoints of the radius curve.
pub const REFERENCE_BREAKPOINTS: [Breakpoint; 5] = [
    Breakpoint::new(100, 4.0),
    Breakpoint::new(500, 8.0),
    Breakpoint::new(2500, 12.0),
    Breakpoint::new(12500, 20.0),
    Breakpoint::new(25000, 48.0),
];

/// Visual constants at the reference canvas size.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReferenceConstants {
    pub canvas_size: u32,
    pub border: f64,
    pub marker_size: f64,
    pub marker_offset: f64,
    pub breakpoints: Vec<Breakpoint>,
}

impl Default for ReferenceConstants {
    fn default() -> Self {
        Self {
            canvas_size: REFERENCE_CANVAS_SIZE,
            border: 1.0,
            marker_size: 12.0,
            marker_offset: 2.0,
            breakpoints: REFERENCE_BREAKPOINTS.to_vec(),
        }
    }
}

/// Settings for a single render.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Side length of the square spiral area in pixels
    pub canvas_size: u32,
    pub steps_per_revolution: u32,
    /// Background padding added on every side when saving
    pub margin: u32,
    /// Push release markers out past the day's circle
    pub marker_clears_circle: bool,
    pub palette: Palette,
    pub reference: ReferenceConstants,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            canvas_size: REFERENCE_CANVAS_SIZE,
            steps_per_revolution: DEFAULT_STEPS_PER_REVOLUTION,
            margin: 50,
            marker_clears_circle: true,
            palette: Palette::default(),
            reference: ReferenceConstants::default(),
        }
    }
}

impl RenderConfig {
    /// Load a configuration from a JSON file. Missing fields take their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        let raw = std::fs::read_to_string(path)?;
        Self::from_json(&raw)
    }

    pub fn from_json(raw: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings no render can be built from.
    pub fn validate(&self) -> Result<()> {
        if self.canvas_size == 0 {
            return Err(SpiralError::InvalidCanvasSize(self.canvas_size));
        }
        if self.reference.canvas_size == 0 {
            return Err(SpiralError::InvalidReferenceSize(self.reference.canvas_size));
        }
        if self.steps_per_revolution == 0 {
            return Err(SpiralError::InvalidStepsPerRevolution(self.steps_per_revolution));
        }
        if padded_side(self.canvas_size, self.margin).is_none() {
            return Err(SpiralError::InvalidMargin {
                size: self.canvas_size,
                margin: self.margin,
            });
        }
        Ok(())
    }
}
