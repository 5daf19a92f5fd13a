//! # Visual Encoding
//!
//! Turns a day's statistics and its spiral position into colors, a circle radius
//! and an optional release marker, then into primitive draw commands. Nothing here
//! touches a drawing surface; [`crate::plotting::canvas::Canvas`] executes the
//! commands.

use chrono::Datelike;

use super::radius::RadiusCurve;
use super::scale::ScaleConstants;
use super::spiral::SpiralPoint;
use super::styles::Swatch;
use crate::types::DayStat;

/// Orientation of a release marker, in degrees clockwise from north.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Marker {
    pub angle_deg: f64,
}

/// How one day is drawn.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Encoding {
    pub fill: Swatch,
    pub border: Swatch,
    pub radius: f64,
    pub marker: Option<Marker>,
}

impl Encoding {
    pub fn draw_marker(&self) -> bool {
        self.marker.is_some()
    }
}

/// A primitive drawing operation in canvas coordinates.
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCommand {
    FillEllipse {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Swatch,
    },
    StrokeEllipse {
        cx: f64,
        cy: f64,
        radius: f64,
        color: Swatch,
        width: f64,
    },
    FillPolygon {
        points: Vec<(f64, f64)>,
        color: Swatch,
    },
    StrokePolygon {
        points: Vec<(f64, f64)>,
        color: Swatch,
        width: f64,
    },
}

/// Decide colors, radius and marker for a day.
pub fn encode(day: &DayStat, curve: &RadiusCurve) -> Encoding {
    let radius = curve.radius_for(day.magnitude());

    let (fill, border) = if day.is_root_commit_day {
        (Swatch::Highlight, Swatch::Secondary)
    } else if day.is_net_growth() {
        (Swatch::Primary, Swatch::Secondary)
    } else {
        (Swatch::Background, Swatch::Primary)
    };

    let marker = day.release_tier.is_marked().then(|| Marker {
        angle_deg: 365.0 / 360.0 * f64::from(day.date.ordinal()),
    });

    Encoding {
        fill,
        border,
        radius,
        marker,
    }
}

/// Fill-then-stroke pair for the day's circle.
pub fn circle_commands(point: &SpiralPoint, encoding: &Encoding, scale: &ScaleConstants) -> [DrawCommand; 2] {
    [
        DrawCommand::FillEllipse {
            cx: point.x,
            cy: point.y,
            radius: encoding.radius,
            color: encoding.fill,
        },
        DrawCommand::StrokeEllipse {
            cx: point.x,
            cy: point.y,
            radius: encoding.radius,
            color: encoding.border,
            width: scale.border_width,
        },
    ]
}

/// Fill-then-stroke pair for the release triangle, if the day has one.
pub fn marker_commands(
    point: &SpiralPoint,
    encoding: &Encoding,
    scale: &ScaleConstants,
    clear_circle: bool,
) -> Option<[DrawCommand; 2]> {
    let marker = encoding.marker?;
    let clearance = if clear_circle { encoding.radius } else { 0.0 };
    let points = marker_triangle(point, marker.angle_deg, scale, clearance).to_vec();

    Some([
        DrawCommand::FillPolygon {
            points: points.clone(),
            color: Swatch::Highlight,
        },
        DrawCommand::StrokePolygon {
            points,
            color: Swatch::Background,
            width: scale.border_width,
        },
    ])
}

/// Vertices of the release triangle.
///
/// The triangle has base and height `marker_size`, points north before rotation,
/// and is centered `marker_size / 2 + marker_offset + clearance` away from the
/// day's point in the direction it points after rotating by `angle_deg`.
pub fn marker_triangle(point: &SpiralPoint, angle_deg: f64, scale: &ScaleConstants, clearance: f64) -> [(f64, f64); 3] {
    let size = scale.marker_size;
    let distance = size / 2.0 + scale.marker_offset + clearance;

    // Screen y grows downwards, so north is 270 degrees and positive rotation is clockwise.
    let direction = (angle_deg + 270.0).to_radians();
    let cx = point.x + distance * direction.cos();
    let cy = point.y + distance * direction.sin();

    let (sin, cos) = angle_deg.to_radians().sin_cos();
    let half = size / 2.0;
    [(0.0, -half), (-half, half), (half, half)].map(|(x, y)| (cx + x * cos - y * sin, cy + x * sin + y * cos))
}
