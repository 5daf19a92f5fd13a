use crate::config::Breakpoint;
use crate::error::{Result, SpiralError};

/// One linear piece of the radius curve, covering `[left_magnitude, right_magnitude]`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RadiusSegment {
    pub left_magnitude: u64,
    pub left_radius: f64,
    pub right_magnitude: u64,
    pub right_radius: f64,
    slope: f64,
    intercept: f64,
}

impl RadiusSegment {
    pub fn new(left_magnitude: u64, left_radius: f64, right_magnitude: u64, right_radius: f64) -> Result<Self> {
        if right_magnitude <= left_magnitude {
            return Err(SpiralError::InvalidCurve(format!(
                "segment {left_magnitude}..{right_magnitude} is empty or reversed"
            )));
        }
        if !left_radius.is_finite() || !right_radius.is_finite() {
            return Err(SpiralError::InvalidCurve(format!(
                "segment {left_magnitude}..{right_magnitude} has a non-finite radius"
            )));
        }

        let slope = (right_radius - left_radius) / (right_magnitude - left_magnitude) as f64;
        let intercept = left_radius - slope * left_magnitude as f64;

        Ok(Self {
            left_magnitude,
            left_radius,
            right_magnitude,
            right_radius,
            slope,
            intercept,
        })
    }

    pub fn contains(&self, magnitude: u64) -> bool {
        self.left_magnitude <= magnitude && magnitude <= self.right_magnitude
    }

    fn interpolate(&self, magnitude: u64) -> f64 {
        self.slope * magnitude as f64 + self.intercept
    }
}

/// Piecewise-linear map from lines changed to circle radius, flat outside its range.
#[derive(Debug, Clone, PartialEq)]
pub struct RadiusCurve {
    segments: Vec<RadiusSegment>,
}

impl RadiusCurve {
    /// Build one segment between each pair of consecutive breakpoints.
    pub fn from_breakpoints(breakpoints: &[Breakpoint]) -> Result<Self> {
        if breakpoints.len() < 2 {
            return Err(SpiralError::InvalidCurve(format!(
                "need at least two breakpoints, got {}",
                breakpoints.len()
            )));
        }

        let segments = breakpoints
            .windows(2)
            .map(|pair| RadiusSegment::new(pair[0].magnitude, pair[0].radius, pair[1].magnitude, pair[1].radius))
            .collect::<Result<Vec<_>>>()?;

        Self::from_segments(segments)
    }

    /// Segments must be sorted ascending and share their boundaries exactly.
    pub fn from_segments(segments: Vec<RadiusSegment>) -> Result<Self> {
        if segments.is_empty() {
            return Err(SpiralError::InvalidCurve("no segments".to_string()));
        }

        for pair in segments.windows(2) {
            let (left, right) = (&pair[0], &pair[1]);
            if left.right_magnitude != right.left_magnitude {
                return Err(SpiralError::InvalidCurve(format!(
                    "gap or overlap between {} and {}",
                    left.right_magnitude, right.left_magnitude
                )));
            }
            if left.right_radius != right.left_radius {
                return Err(SpiralError::InvalidCurve(format!(
                    "discontinuity at {}: {} vs {}",
                    left.right_magnitude, left.right_radius, right.left_radius
                )));
            }
        }

        Ok(Self { segments })
    }

    pub fn segments(&self) -> &[RadiusSegment] {
        &self.segments
    }

    pub fn radius_for(&self, magnitude: u64) -> f64 {
        let first = &self.segments[0];
        let last = &self.segments[self.segments.len() - 1];

        if magnitude <= first.left_magnitude {
            return first.left_radius;
        }
        if magnitude >= last.right_magnitude {
            return last.right_radius;
        }

        // First segment whose right edge reaches the magnitude; shared boundaries
        // resolve to the left segment, which yields the same value as the right one.
        let idx = self
            .segments
            .partition_point(|segment| segment.right_magnitude < magnitude);
        let segment = &self.segments[idx];
        debug_assert!(segment.contains(magnitude));
        segment.interpolate(magnitude)
    }
}
