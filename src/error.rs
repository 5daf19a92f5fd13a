use chrono::NaiveDate;
use thiserror::Error;

/// Errors produced while collecting history or rendering the spiral.
#[derive(Debug, Error)]
pub enum SpiralError {
    #[error("canvas size must be positive, got {0}")]
    InvalidCanvasSize(u32),

    #[error("reference canvas size must be positive, got {0}")]
    InvalidReferenceSize(u32),

    #[error("margin {margin} around a {size} pixel canvas gives an image too large to allocate")]
    InvalidMargin { size: u32, margin: u32 },

    #[error("steps per revolution must be positive, got {0}")]
    InvalidStepsPerRevolution(u32),

    #[error("end date {end} lies in an earlier year than start date {start}")]
    InvertedDateRange { start: NaiveDate, end: NaiveDate },

    #[error("no commits to render")]
    EmptyHistory,

    #[error("invalid radius curve: {0}")]
    InvalidCurve(String),

    #[error("git error: {0}")]
    Git(#[from] git2::Error),

    #[error("drawing failed: {0}")]
    Draw(String),

    #[error("image encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("invalid configuration: {0}")]
    Config(#[from] serde_json::Error),

    #[error("background task failed: {0}")]
    Task(String),
}

pub type Result<T> = std::result::Result<T, SpiralError>;
