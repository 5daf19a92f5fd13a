pub mod canvas;
pub mod encoder;
pub mod radius;
pub mod render;
pub mod scale;
pub mod spiral;
pub mod styles;

pub use canvas::Canvas;
pub use encoder::{encode, DrawCommand, Encoding, Marker};
pub use radius::{RadiusCurve, RadiusSegment};
pub use render::{plan, render, Layout};
pub use scale::ScaleConstants;
pub use spiral::{SpiralPoint, SpiralProjector};
pub use styles::{Palette, Swatch};
