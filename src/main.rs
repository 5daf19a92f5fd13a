//! Git History Spiral
//!
//! Command-line front end: reads a repository and writes its history as an image.

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, ValueHint};
use std::path::PathBuf;
use std::time::Instant;
use tokio::runtime::Runtime;
use tracing::info;
use tracing_subscriber::EnvFilter;

use gitspiral::{analysis, plotting, utils, RenderConfig};

#[derive(Parser, Debug)]
#[command(name = "gitspiral", author, version, about = "Render a repository's history as a spiral", long_about = None)]
struct Cli {
    /// Path to the git repository
    #[arg(short, long, value_hint = ValueHint::DirPath)]
    input: PathBuf,

    /// Path of the image to write; the extension picks the format
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    output: PathBuf,

    /// Size of the square image in pixels, margin excluded
    #[arg(short, long)]
    size: Option<u32>,

    /// Branch to walk (defaults to HEAD)
    #[arg(short, long)]
    branch: Option<String>,

    /// Days per spiral revolution
    #[arg(long)]
    steps: Option<u32>,

    /// Background margin around the spiral in pixels
    #[arg(long)]
    margin: Option<u32>,

    /// JSON render configuration; flags override its values
    #[arg(short, long, env = "GITSPIRAL_CONFIG", value_hint = ValueHint::FilePath)]
    config: Option<PathBuf>,

    /// Also write the per-day statistics as JSON
    #[arg(long, value_hint = ValueHint::FilePath)]
    stats_json: Option<PathBuf>,

    /// Increase verbosity (-v, -vv)
    #[arg(short, long, action = ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

impl Cli {
    fn render_config(&self) -> Result<RenderConfig> {
        let mut config = match &self.config {
            Some(path) => RenderConfig::from_file(path)
                .with_context(|| format!("failed to load config from {}", path.display()))?,
            None => RenderConfig::default(),
        };

        if let Some(size) = self.size {
            config.canvas_size = size;
        }
        if let Some(steps) = self.steps {
            config.steps_per_revolution = steps;
        }
        if let Some(margin) = self.margin {
            config.margin = margin;
        }

        config.validate()?;
        Ok(config)
    }
}

fn init_tracing(cli: &Cli) {
    let default_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "info",
            1 => "debug",
            _ => "trace",
        }
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let started = Instant::now();
    let config = cli.render_config()?;

    let rt = Runtime::new().context("failed to start the async runtime")?;
    let repo_path = cli.input.to_string_lossy().into_owned();
    let commits = rt
        .block_on(analysis::collect_history(repo_path, cli.branch.clone()))
        .with_context(|| format!("failed to read history of {}", cli.input.display()))?;

    let days = utils::aggregate_by_day(&commits);
    if let Some(path) = &cli.stats_json {
        let json = serde_json::to_string_pretty(&days)?;
        std::fs::write(path, json).with_context(|| format!("failed to write {}", path.display()))?;
    }

    let canvas = plotting::render(&days, &config)?;
    canvas
        .save(&cli.output)
        .with_context(|| format!("failed to save {}", cli.output.display()))?;

    info!("Total: {:.2} seconds", started.elapsed().as_secs_f64());
    Ok(())
}
