use image::{ExtendedColorType, ImageFormat, RgbImage};
use plotters::coord::Shift;
use plotters::prelude::*;
use std::path::Path;

use super::encoder::DrawCommand;
use super::styles::Palette;
use crate::error::{Result, SpiralError};

fn draw_err<E: std::fmt::Display>(e: E) -> SpiralError {
    SpiralError::Draw(e.to_string())
}

fn to_pixel((x, y): (f64, f64)) -> (i32, i32) {
    (x.round() as i32, y.round() as i32)
}

fn to_width(width: f64) -> u32 {
    width.round().max(1.0) as u32
}

/// Side length of the padded image, or `None` when it or its RGB buffer
/// does not fit in memory addressing.
pub fn padded_side(size: u32, margin: u32) -> Option<u32> {
    let side = margin.checked_mul(2)?.checked_add(size)?;
    let pixels = (side as usize).checked_mul(side as usize)?;
    pixels.checked_mul(3)?;
    Some(side)
}

/// Square RGB bitmap the spiral is drawn on, padded by a background margin.
///
/// Commands address the inner `size × size` area; the margin is never drawn on.
pub struct Canvas {
    size: u32,
    margin: u32,
    palette: Palette,
    buffer: Vec<u8>,
}

impl Canvas {
    pub fn new(size: u32, margin: u32, palette: Palette) -> Result<Self> {
        let side = padded_side(size, margin).ok_or(SpiralError::InvalidMargin { size, margin })? as usize;
        let buffer = palette.background.repeat(side * side);
        Ok(Self {
            size,
            margin,
            palette,
            buffer,
        })
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Width and height of the saved image, margin included.
    pub fn dimensions(&self) -> (u32, u32) {
        let side = self.size + 2 * self.margin;
        (side, side)
    }

    /// Execute commands in order. Each call is a single writer on the bitmap.
    pub fn draw(&mut self, commands: &[DrawCommand]) -> Result<()> {
        let dimensions = self.dimensions();
        let margin = self.margin;
        let palette = self.palette;

        let root = BitMapBackend::with_buffer(&mut self.buffer, dimensions).into_drawing_area();
        let area = root.margin(margin, margin, margin, margin);
        for command in commands {
            apply(&area, &palette, command)?;
        }
        root.present().map_err(draw_err)?;
        Ok(())
    }

    pub fn into_image(self) -> Result<RgbImage> {
        let (width, height) = self.dimensions();
        RgbImage::from_raw(width, height, self.buffer)
            .ok_or_else(|| SpiralError::Draw("pixel buffer does not match canvas size".to_string()))
    }

    /// Encode to `path`, picking the format from its extension.
    pub fn save(&self, path: &Path) -> Result<()> {
        let format = ImageFormat::from_path(path)?;
        let (width, height) = self.dimensions();
        image::save_buffer_with_format(path, &self.buffer, width, height, ExtendedColorType::Rgb8, format)?;
        Ok(())
    }
}

fn apply(area: &DrawingArea<BitMapBackend, Shift>, palette: &Palette, command: &DrawCommand) -> Result<()> {
    match command {
        DrawCommand::FillEllipse { cx, cy, radius, color } => {
            let style = palette.resolve(*color).filled();
            area.draw(&Circle::new(to_pixel((*cx, *cy)), to_width(*radius), style))
                .map_err(draw_err)
        }
        DrawCommand::StrokeEllipse {
            cx,
            cy,
            radius,
            color,
            width,
        } => {
            let style = palette.resolve(*color).stroke_width(to_width(*width));
            area.draw(&Circle::new(to_pixel((*cx, *cy)), to_width(*radius), style))
                .map_err(draw_err)
        }
        DrawCommand::FillPolygon { points, color } => {
            let style = palette.resolve(*color).filled();
            let pixels: Vec<(i32, i32)> = points.iter().copied().map(to_pixel).collect();
            area.draw(&Polygon::new(pixels, style)).map_err(draw_err)
        }
        DrawCommand::StrokePolygon { points, color, width } => {
            let style = palette.resolve(*color).stroke_width(to_width(*width));
            let mut pixels: Vec<(i32, i32)> = points.iter().copied().map(to_pixel).collect();
            if let Some(&first) = pixels.first() {
                pixels.push(first);
            }
            area.draw(&PathElement::new(pixels, style)).map_err(draw_err)
        }
    }
}
