use rayon::prelude::*;
use std::cmp::Reverse;
use std::time::Instant;
use tracing::{debug, info};

use super::canvas::Canvas;
use super::encoder::{circle_commands, encode, marker_commands, DrawCommand, Encoding};
use super::radius::RadiusCurve;
use super::scale::ScaleConstants;
use super::spiral::{SpiralPoint, SpiralProjector};
use crate::config::RenderConfig;
use crate::error::Result;
use crate::types::DayStat;
use crate::utils::date_range;

/// A day with its position and encoding resolved.
#[derive(Debug, Clone, Copy)]
struct PlacedDay {
    magnitude: u64,
    point: SpiralPoint,
    encoding: Encoding,
}

/// Everything sized for one render.
pub struct Layout {
    pub scale: ScaleConstants,
    pub curve: RadiusCurve,
    pub projector: SpiralProjector,
}

impl Layout {
    pub fn new(days: &[DayStat], config: &RenderConfig) -> Result<Self> {
        config.validate()?;
        let (start, end) = date_range(days)?;

        let scale = ScaleConstants::create(config.canvas_size, &config.reference)?;
        let curve = RadiusCurve::from_breakpoints(&scale.breakpoints)?;
        let projector = SpiralProjector::new(config.canvas_size, config.steps_per_revolution, start, end)?;
        debug!(
            %start,
            %end,
            turns = projector.turns(),
            factor = scale.factor,
            "layout ready"
        );

        Ok(Self {
            scale,
            curve,
            projector,
        })
    }
}

/// Compute the full, ordered list of draw commands for `days`.
///
/// Circles come first, largest magnitude first so small days stay visible on top,
/// followed by every release marker.
pub fn plan(days: &[DayStat], config: &RenderConfig) -> Result<Vec<DrawCommand>> {
    let layout = Layout::new(days, config)?;

    let mut placed: Vec<PlacedDay> = days
        .par_iter()
        .map(|day| PlacedDay {
            magnitude: day.magnitude(),
            point: layout.projector.project(day.date),
            encoding: encode(day, &layout.curve),
        })
        .collect();
    placed.sort_by_key(|day| Reverse(day.magnitude));

    let mut commands = Vec::with_capacity(placed.len() * 2);
    for day in &placed {
        commands.extend(circle_commands(&day.point, &day.encoding, &layout.scale));
    }
    for day in &placed {
        if let Some(marker) = marker_commands(&day.point, &day.encoding, &layout.scale, config.marker_clears_circle) {
            commands.extend(marker);
        }
    }

    Ok(commands)
}

/// Draw `days` onto a fresh canvas.
pub fn render(days: &[DayStat], config: &RenderConfig) -> Result<Canvas> {
    info!("Total entries to process: {}", days.len());
    let start_time = Instant::now();

    let commands = plan(days, config)?;
    let mut canvas = Canvas::new(config.canvas_size, config.margin, config.palette)?;
    canvas.draw(&commands)?;

    info!(
        commands = commands.len(),
        "Image drawn in {:.2}s",
        start_time.elapsed().as_secs_f64()
    );
    Ok(canvas)
}
