//! # Git History Spiral
//!
//! `gitspiral` renders a Git repository's commit history as a radial timeline.
//! Every calendar day with commits becomes one circle on an outward-winding
//! Archimedean spiral; its size follows the number of lines changed that day,
//! its colors tell growth from shrinkage, and the very first commit and major or
//! minor releases stand out.
//!
//! ## Pipeline
//!
//! - [`analysis::collect_history`] walks the repository and summarizes each commit
//! - [`utils::aggregate_by_day`] folds commits into one [`DayStat`] per date
//! - [`plotting::render`] projects, encodes and draws every day onto a [`plotting::Canvas`]
//!
//! All visual constants are tuned for a 2800 pixel canvas and scaled from there.
//!
//! ## Example
//!
//! ```no_run
//! use gitspiral::{analysis, plotting, utils, RenderConfig};
//! use std::path::Path;
//!
//! # async fn run() -> gitspiral::Result<()> {
//! let commits = analysis::collect_history(".".to_string(), None).await?;
//! let days = utils::aggregate_by_day(&commits);
//! let canvas = plotting::render(&days, &RenderConfig::default())?;
//! canvas.save(Path::new("history.png"))?;
//! # Ok(())
//! # }
//! ```

pub mod analysis;
pub mod config;
pub mod error;
pub mod plotting;
pub mod types;
pub mod utils;

// Re-export main types for convenience
pub use config::{ReferenceConstants, RenderConfig};
pub use error::{Result, SpiralError};
pub use types::{CommitSummary, DayStat, ReleaseTier};
