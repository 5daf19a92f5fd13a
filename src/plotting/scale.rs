use crate::config::{Breakpoint, ReferenceConstants};
use crate::error::{Result, SpiralError};

/// Drawing constants scaled to one output canvas.
///
/// Every reference value is multiplied by `reference.canvas_size / canvas_size`.
/// Breakpoint magnitudes are line counts and stay as they are; only their radii
/// are scaled.
#[derive(Debug, Clone, PartialEq)]
pub struct ScaleConstants {
    pub factor: f64,
    pub border_width: f64,
    pub marker_size: f64,
    pub marker_offset: f64,
    pub breakpoints: Vec<Breakpoint>,
}

impl ScaleConstants {
    pub fn create(canvas_size: u32, reference: &ReferenceConstants) -> Result<Self> {
        if canvas_size == 0 {
            return Err(SpiralError::InvalidCanvasSize(canvas_size));
        }
        if reference.canvas_size == 0 {
            return Err(SpiralError::InvalidReferenceSize(reference.canvas_size));
        }

        let factor = f64::from(reference.canvas_size) / f64::from(canvas_size);
        let breakpoints = reference
            .breakpoints
            .iter()
            .map(|bp| Breakpoint::new(bp.magnitude, bp.radius * factor))
            .collect();

        Ok(Self {
            factor,
            border_width: reference.border * factor,
            marker_size: reference.marker_size * factor,
            marker_offset: reference.marker_offset * factor,
            breakpoints,
        })
    }
}
