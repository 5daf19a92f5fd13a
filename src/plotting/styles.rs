use plotters::style::RGBColor;
use serde::{Deserialize, Serialize};

/// Color scheme of the spiral
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Palette {
    pub background: [u8; 3],
    pub primary: [u8; 3],
    pub secondary: [u8; 3],
    pub highlight: [u8; 3],
}

impl Default for Palette {
    fn default() -> Self {
        Self {
            background: [20, 28, 48],
            primary: [144, 160, 204],
            secondary: [10, 16, 36],
            highlight: [183, 88, 70],
        }
    }
}

impl Palette {
    /// Resolve a color role to a concrete color
    pub fn resolve(&self, swatch: Swatch) -> RGBColor {
        let [r, g, b] = match swatch {
            Swatch::Background => self.background,
            Swatch::Primary => self.primary,
            Swatch::Secondary => self.secondary,
            Swatch::Highlight => self.highlight,
        };
        RGBColor(r, g, b)
    }
}

/// Color role picked by the encoder, resolved against a [`Palette`] when drawing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Swatch {
    Background,
    Primary,
    Secondary,
    Highlight,
}
